//! Command implementations for the CLI.

/// Validates the options and converts one video into a timelapse GIF.
pub mod convert;
