// ============================================================================
// giflapse-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates every interaction with the external media engine:
// probing a file for its video metadata, spawning the ffmpeg transcode, and
// checking that the engine is installed at all. Each collaborator sits behind
// a trait so orchestration code can be exercised with mocks.
//
// KEY COMPONENTS:
// - MediaProber / FfprobeProber: video metadata via the ffprobe crate
// - FfmpegSpawner / SidecarSpawner: process control via ffmpeg-sidecar
// - run_transcode: builds and runs the GIF encode
// - check_engine: availability precondition
//
// AI-ASSISTANT-INFO: External tool interactions and abstractions for ffmpeg/ffprobe

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, command_start_error};

// ---- Standard library imports ----
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// GIF command construction and execution
pub mod ffmpeg;

/// Traits and implementations for spawning ffmpeg processes
pub mod ffmpeg_executor;

/// Traits and implementations for probing media files
pub mod ffprobe_executor;

/// Test doubles for the spawner and prober
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg::{TranscodeRequest, build_gif_command, run_transcode};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use ffprobe_executor::{FfprobeProber, MediaProber, VideoMetadata};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Tools that must be executable before any conversion starts.
pub const REQUIRED_TOOLS: [&str; 2] = ["ffmpeg", "ffprobe"];

/// Checks that a command can be started with `-version`.
///
/// # Errors
///
/// * [`CoreError::EngineUnavailable`] when the command is not on PATH
/// * [`CoreError::CommandStart`] when it exists but could not be started
pub(crate) fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(status) if status.success() => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Ok(status) => {
            log::warn!("Dependency '{cmd_name}' exited with {status} on -version");
            Err(CoreError::EngineUnavailable(cmd_name.to_string()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::EngineUnavailable(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(command_start_error(cmd_name, e))
        }
    }
}

/// Verifies that ffmpeg and ffprobe are both reachable.
///
/// # Errors
///
/// Returns the first failure from [`check_dependency`].
pub fn check_engine() -> CoreResult<()> {
    for tool in REQUIRED_TOOLS {
        check_dependency(tool)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dependency_is_engine_unavailable() {
        let result = check_dependency("giflapse-definitely-not-a-real-binary");
        assert!(matches!(result, Err(CoreError::EngineUnavailable(name)) if name.contains("giflapse")));
    }
}
