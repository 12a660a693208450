// ============================================================================
// giflapse-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger initialization for the CLI
//
// The application uses env_logger with the RUST_LOG environment variable:
// - RUST_LOG=warn (default): warnings and errors only
// - RUST_LOG=info: progress milestones and ffmpeg start/finish
// - RUST_LOG=debug: filter graph, ffmpeg command, plan as JSON
// - RUST_LOG=ffmpeg_log=trace: everything ffmpeg prints
//
// AI-ASSISTANT-INFO: Logging initialization

use env_logger::{Builder, Env};

/// Filter used when RUST_LOG is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Initializes env_logger on stderr. Safe to call more than once.
pub fn init_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp(None)
        .format_target(true)
        .try_init();
}
