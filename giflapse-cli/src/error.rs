// ============================================================================
// giflapse-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and reporting for the CLI
//
// The CLI reuses the core error type; every failure ends up as a single
// "Error: ..." line on stderr and exit code 1.
//
// AI-ASSISTANT-INFO: CLI error handling utilities

use console::style;
use giflapse_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Exit code for every failure, including argument errors.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Prints an error as a single red line on stderr.
pub fn print_error(error: &CoreError) {
    eprintln!("{} {}", style("Error:").red().bold(), error);
}
