// giflapse-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests and when the "test-mocks" feature is enabled.

use super::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner};
use super::ffprobe_executor::{MediaProber, VideoMetadata};
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::RefCell;
use std::path::Path;
use std::process::ExitStatus;
use std::rc::Rc;

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    // Raw wait status: the exit code lives in the second byte.
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Mock implementation of FfmpegProcess.
pub struct MockFfmpegProcess {
    /// Events to emit when drain_events is called.
    pub events_to_emit: Vec<FfmpegEvent>,
    /// Exit status to return when finish is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn drain_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events_to_emit.drain(..) {
            handler(event)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

enum MockOutcome {
    Run {
        events: Vec<FfmpegEvent>,
        exit_code: i32,
        create_output: bool,
    },
    SpawnError(CoreError),
}

/// Mock implementation of FfmpegSpawner.
///
/// Outcomes are consumed in the order they were added; every spawn records
/// the full argument vector it received.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    outcomes: Rc<RefCell<Vec<MockOutcome>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next spawn emits `events`, exits 0 and optionally writes a dummy output file.
    pub fn add_success(&self, events: Vec<FfmpegEvent>, create_output: bool) {
        self.outcomes.borrow_mut().push(MockOutcome::Run {
            events,
            exit_code: 0,
            create_output,
        });
    }

    /// Next spawn emits `events` and exits with `exit_code`.
    pub fn add_exit_error(&self, events: Vec<FfmpegEvent>, exit_code: i32) {
        self.outcomes.borrow_mut().push(MockOutcome::Run {
            events,
            exit_code,
            create_output: false,
        });
    }

    /// Next spawn fails before a process exists.
    pub fn add_spawn_error(&self, error: CoreError) {
        self.outcomes
            .borrow_mut()
            .push(MockOutcome::SpawnError(error));
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn launch(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let mut outcomes = self.outcomes.borrow_mut();
        if outcomes.is_empty() {
            return Err(CoreError::TranscodeFailure(
                "MockFfmpegSpawner: no outcome configured".to_string(),
            ));
        }

        match outcomes.remove(0) {
            MockOutcome::Run {
                events,
                exit_code,
                create_output,
            } => {
                if create_output {
                    if let Some(output) = args.last() {
                        if let Err(e) = std::fs::write(output, b"GIF89a") {
                            log::error!("MockFfmpegSpawner failed to create {output}: {e}");
                        }
                    }
                }
                Ok(MockFfmpegProcess {
                    events_to_emit: events,
                    exit_status: exit_status(exit_code),
                })
            }
            MockOutcome::SpawnError(err) => Err(err),
        }
    }
}

/// Prober returning fixed metadata, or failing with a fixed reason.
#[derive(Debug, Clone)]
pub struct StaticProber {
    result: Result<VideoMetadata, String>,
    calls: Rc<RefCell<usize>>,
}

impl StaticProber {
    pub fn new(metadata: VideoMetadata) -> Self {
        Self {
            result: Ok(metadata),
            calls: Rc::default(),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            result: Err(reason.into()),
            calls: Rc::default(),
        }
    }

    /// Convenience: `duration` seconds of `width`x`height` video at `rate`.
    pub fn video(duration_secs: f64, width: u32, height: u32, rate: &str) -> Self {
        Self::new(VideoMetadata {
            duration_secs,
            width,
            height,
            frame_rate: Some(rate.to_string()),
        })
    }

    pub fn call_count(&self) -> usize {
        *self.calls.borrow()
    }
}

impl MediaProber for StaticProber {
    fn probe(&self, path: &Path) -> CoreResult<VideoMetadata> {
        *self.calls.borrow_mut() += 1;
        self.result
            .clone()
            .map_err(|reason| crate::error::probe_failure(path, reason))
    }
}
