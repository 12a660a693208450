// ============================================================================
// giflapse-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for giflapse-core
//
// This module defines the error types used throughout the giflapse-core
// library. Every failure the tool can report ends up as one CoreError
// variant, rendered as a single human-readable line by the CLI.
//
// KEY COMPONENTS:
// - CoreError: Enum of all error kinds (parsing, validation, engine)
// - CoreResult: Type alias for Result<T, CoreError>
// - Helper functions for external command failures
//
// AI-ASSISTANT-INFO: Error handling system for the core library

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by the giflapse core library.
#[derive(Error, Debug)]
pub enum CoreError {
    // ---- Input parsing ----
    #[error("Invalid time format: '{0}'. Use SS, MM:SS or HH:MM:SS")]
    InvalidTimeFormat(String),

    #[error("Time cannot be negative: '{0}'")]
    NegativeTime(String),

    // ---- Planning ----
    #[error(
        "Start time {start:.2}s is at or beyond the end of the video ({duration:.2}s)"
    )]
    RangeExhausted { start: f64, duration: f64 },

    // ---- Validation ----
    #[error("Unsupported input format '{0}'. Supported formats: .mp4, .mov")]
    UnsupportedFormat(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Unknown quality preset '{0}'. Expected one of: low, medium, high")]
    UnknownQualityPreset(String),

    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("Output file already exists: {0} (use --overwrite to replace it)")]
    OutputExists(String),

    #[error("Path error: {0}")]
    PathError(String),

    // ---- External engine ----
    #[error("Required tool '{0}' was not found. Please install ffmpeg (which ships ffprobe)")]
    EngineUnavailable(String),

    #[error("Failed to probe '{path}': {reason}")]
    ProbeFailure { path: String, reason: String },

    #[error("Conversion failed: {0}")]
    TranscodeFailure(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed to wait for command '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

}

/// Result type alias used throughout giflapse-core.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a `CommandStart` error for the named command.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds a `CommandWait` error for the named command.
pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Builds a `TranscodeFailure` describing a command that exited unsuccessfully.
///
/// Multi-line stderr is folded into one line, separated by `"; "`.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    let stderr = join_lines(&stderr.into());
    let code = status
        .code()
        .map_or_else(|| "signal".to_string(), |c| c.to_string());
    if stderr.is_empty() {
        CoreError::TranscodeFailure(format!("{} exited with status {}", cmd.into(), code))
    } else {
        CoreError::TranscodeFailure(format!(
            "{} exited with status {}: {}",
            cmd.into(),
            code,
            stderr
        ))
    }
}

/// Builds a `ProbeFailure` for the given path.
pub fn probe_failure(path: &std::path::Path, reason: impl Into<String>) -> CoreError {
    CoreError::ProbeFailure {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Non-empty trimmed lines of `text`, joined with `"; "`.
fn join_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }

    #[cfg(unix)]
    #[test]
    fn test_command_failed_error_is_one_line() {
        let err = command_failed_error(
            "ffmpeg",
            exit_status(1),
            "Invalid data found when processing input\n\n  Conversion failed!\n",
        );
        let msg = err.to_string();
        assert!(!msg.contains('\n'), "message: {msg}");
        assert_eq!(
            msg,
            "Conversion failed: ffmpeg exited with status 1: \
             Invalid data found when processing input; Conversion failed!"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_command_failed_error_without_stderr() {
        let err = command_failed_error("ffmpeg", exit_status(2), " \n ");
        assert_eq!(err.to_string(), "Conversion failed: ffmpeg exited with status 2");
    }
}
