//! `FFmpeg` progress handling for the GIF encode.
//!
//! Turns the ffmpeg-sidecar event stream into percentage updates for the
//! caller, routes ffmpeg's own log lines to the `log` facade and keeps the
//! stderr error lines around for the failure message.

use crate::error::CoreResult;
use crate::utils::{format_duration_seconds, parse_ffmpeg_time};
use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress, LogLevel as FfmpegLogLevel};

/// Log target for progress milestones.
pub const PROGRESS_TARGET: &str = "giflapse::progress";

/// Log target for ffmpeg's own output.
pub const FFMPEG_LOG_TARGET: &str = "ffmpeg_log";

/// Milestone spacing for info-level progress logging, in percent.
const LOG_STEP_PERCENT: i32 = 25;

/// Handler for `FFmpeg` events of one transcode.
pub struct TranscodeProgressHandler<F>
where
    F: FnMut(f32),
{
    expected_secs: Option<f64>,
    on_progress: F,
    last_percent: f32,
    last_logged_step: i32,
    stderr_buffer: String,
}

impl<F> TranscodeProgressHandler<F>
where
    F: FnMut(f32),
{
    /// `expected_secs` is the output length progress is measured against;
    /// without it, percentages cannot be computed and are not reported.
    pub fn new(expected_secs: Option<f64>, on_progress: F) -> Self {
        Self {
            expected_secs: expected_secs.filter(|d| d.is_finite() && *d > 0.0),
            on_progress,
            last_percent: 0.0,
            last_logged_step: -1,
            stderr_buffer: String::new(),
        }
    }

    /// Handles an `FFmpeg` event
    pub fn handle_event(&mut self, event: FfmpegEvent) -> CoreResult<()> {
        match event {
            FfmpegEvent::Progress(progress) => self.handle_progress(&progress),
            FfmpegEvent::Log(level, message) => self.handle_log(&level, &message),
            FfmpegEvent::Error(error) => self.handle_error(&error),
            FfmpegEvent::Done => log::debug!("ffmpeg reported end of output"),
            _ => {}
        }
        Ok(())
    }

    /// Collected ffmpeg error lines, one per line.
    #[must_use]
    pub fn stderr_buffer(&self) -> &str {
        &self.stderr_buffer
    }

    /// Forwards `percent` after clamping; ignores non-finite values and
    /// anything below what was already reported.
    pub fn report(&mut self, percent: f64) {
        if !percent.is_finite() {
            return;
        }
        let percent = percent.clamp(0.0, 100.0) as f32;
        if percent < self.last_percent {
            return;
        }
        self.last_percent = percent;
        (self.on_progress)(percent);

        let step = (percent as i32 / LOG_STEP_PERCENT) * LOG_STEP_PERCENT;
        if step > self.last_logged_step {
            log::info!(target: PROGRESS_TARGET, "GIF encode {step}% complete");
            self.last_logged_step = step;
        }
    }

    fn handle_progress(&mut self, progress: &FfmpegProgress) {
        let Some(expected) = self.expected_secs else {
            return;
        };
        let Some(current_secs) = parse_ffmpeg_time(&progress.time) else {
            return;
        };
        log::trace!(
            "ffmpeg progress: frame={} time={} / {}",
            progress.frame,
            format_duration_seconds(current_secs),
            format_duration_seconds(expected)
        );
        self.report(current_secs / expected * 100.0);
    }

    fn handle_log(&mut self, level: &FfmpegLogLevel, message: &str) {
        let log_level = map_ffmpeg_log_level(level);
        if log_level == log::Level::Info {
            log::debug!(target: FFMPEG_LOG_TARGET, "{message}");
        } else {
            log::log!(target: FFMPEG_LOG_TARGET, log_level, "{message}");
        }
        if matches!(level, FfmpegLogLevel::Error | FfmpegLogLevel::Fatal) {
            self.push_stderr(message);
        }
    }

    fn handle_error(&mut self, error: &str) {
        if is_non_critical_ffmpeg_error(error) {
            log::debug!("ffmpeg non-critical message: {error}");
            return;
        }
        log::debug!("ffmpeg stderr error: {error}");
        self.push_stderr(error);
    }

    fn push_stderr(&mut self, line: &str) {
        self.stderr_buffer.push_str(line.trim_end());
        self.stderr_buffer.push('\n');
    }
}

/// Maps `FFmpeg` log level to Rust log level
fn map_ffmpeg_log_level(level: &FfmpegLogLevel) -> log::Level {
    match level {
        FfmpegLogLevel::Fatal | FfmpegLogLevel::Error => log::Level::Error,
        FfmpegLogLevel::Warning => log::Level::Warn,
        FfmpegLogLevel::Info => log::Level::Info,
        _ => log::Level::Trace,
    }
}

/// Messages ffmpeg prints to stderr that do not indicate a problem with the GIF.
fn is_non_critical_ffmpeg_error(error: &str) -> bool {
    error.contains("deprecated pixel format")
        || error.contains("No accelerated colorspace conversion")
        || error.contains("automatically inserted filter")
        || error.contains("Timestamps are unset")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress_at(time: &str) -> FfmpegEvent {
        FfmpegEvent::Progress(FfmpegProgress {
            frame: 10,
            fps: 0.0,
            q: 0.0,
            size_kb: 0,
            time: time.to_string(),
            bitrate_kbps: 0.0,
            speed: 1.0,
            raw_log_message: String::new(),
        })
    }

    #[test]
    fn test_progress_is_percentage_of_expected() {
        let mut seen = Vec::new();
        let mut handler = TranscodeProgressHandler::new(Some(5.0), |p| seen.push(p));
        handler.handle_event(progress_at("00:00:01.00")).unwrap();
        handler.handle_event(progress_at("00:00:02.50")).unwrap();
        handler.handle_event(progress_at("00:00:05.00")).unwrap();
        drop(handler);
        assert_eq!(seen, vec![20.0, 50.0, 100.0]);
    }

    #[test]
    fn test_progress_is_clamped_and_monotonic() {
        let mut seen = Vec::new();
        let mut handler = TranscodeProgressHandler::new(Some(5.0), |p| seen.push(p));
        handler.handle_event(progress_at("00:00:03.00")).unwrap();
        handler.handle_event(progress_at("00:00:02.00")).unwrap();
        handler.handle_event(progress_at("00:00:09.00")).unwrap();
        handler.handle_event(progress_at("N/A")).unwrap();
        handler.report(f64::NAN);
        drop(handler);
        assert_eq!(seen, vec![60.0, 100.0]);
    }

    #[test]
    fn test_progress_without_expected_length_is_ignored() {
        let mut calls = 0;
        let mut handler = TranscodeProgressHandler::new(None, |_| calls += 1);
        handler.handle_event(progress_at("00:00:01.00")).unwrap();
        drop(handler);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_errors_are_collected() {
        let mut handler = TranscodeProgressHandler::new(Some(5.0), |_| {});
        handler
            .handle_event(FfmpegEvent::Error("Invalid data found when processing input".into()))
            .unwrap();
        handler
            .handle_event(FfmpegEvent::Error("Timestamps are unset in a packet".into()))
            .unwrap();
        handler
            .handle_event(FfmpegEvent::Log(FfmpegLogLevel::Fatal, "Conversion failed!".into()))
            .unwrap();
        assert_eq!(
            handler.stderr_buffer(),
            "Invalid data found when processing input\nConversion failed!\n"
        );
    }
}
