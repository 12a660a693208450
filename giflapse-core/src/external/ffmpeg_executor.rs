// ============================================================================
// giflapse-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Launching the GIF encode
//
// A conversion starts exactly one ffmpeg process. run_transcode launches it,
// drains its event stream into the progress handler and then collects the
// exit status. The two traits below are that contract; SidecarSpawner is the
// real thing and the mocks module replays scripted events instead.
//
// AI-ASSISTANT-INFO: ffmpeg launch seam for the single GIF encode

use crate::error::{CoreError, CoreResult, command_start_error, command_wait_error};
use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::io;
use std::process::ExitStatus;

const FFMPEG: &str = "ffmpeg";

/// A launched GIF encode.
pub trait FfmpegProcess {
    /// Feeds every event ffmpeg emits to `on_event` until its output ends.
    /// Stops early if `on_event` fails.
    fn drain_events<F>(&mut self, on_event: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Blocks until ffmpeg exits.
    fn finish(&mut self) -> CoreResult<ExitStatus>;
}

/// Starts GIF encodes.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;

    fn launch(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

/// Running ffmpeg child owned by ffmpeg-sidecar.
pub struct SidecarProcess {
    child: FfmpegChild,
    pid: u32,
}

impl FfmpegProcess for SidecarProcess {
    fn drain_events<F>(&mut self, on_event: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let pid = self.pid;
        let events = self.child.iter().map_err(|e| {
            CoreError::TranscodeFailure(format!("could not read ffmpeg output (pid {pid}): {e}"))
        })?;
        events.map(on_event).collect()
    }

    fn finish(&mut self) -> CoreResult<ExitStatus> {
        let status = self
            .child
            .wait()
            .map_err(|e| command_wait_error(FFMPEG, e))?;
        log::debug!("ffmpeg (pid {}) exited with {status}", self.pid);
        Ok(status)
    }
}

/// Launches ffmpeg through ffmpeg-sidecar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn launch(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CoreError::EngineUnavailable(FFMPEG.to_string()),
            _ => command_start_error(FFMPEG, e),
        })?;
        let pid = child.as_inner().id();
        log::debug!("Launched ffmpeg for GIF encode (pid {pid})");
        Ok(SidecarProcess { child, pid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_engine_unavailable() {
        let cmd = FfmpegCommand::new_with_path("giflapse-no-such-ffmpeg-binary");
        let result = SidecarSpawner.launch(cmd);
        assert!(matches!(result, Err(CoreError::EngineUnavailable(name)) if name == "ffmpeg"));
    }
}
