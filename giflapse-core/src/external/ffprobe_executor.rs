//! FFprobe integration for reading video metadata.
//!
//! Only the first video stream matters: its dimensions and frame rate, plus
//! the container duration (falling back to the stream's own duration).

use crate::config::DEFAULT_NATIVE_FPS;
use crate::error::{CoreError, CoreResult, probe_failure};
use crate::framerate::parse_fraction;
use ffprobe::{FfProbeError, ffprobe};
use serde::Serialize;
use std::path::Path;

/// Metadata of the source video, as reported by the prober.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMetadata {
    pub duration_secs: f64,
    pub width: u32,
    pub height: u32,
    /// Raw frame-rate expression, e.g. `30000/1001`.
    pub frame_rate: Option<String>,
}

impl VideoMetadata {
    /// Native frame rate, or [`DEFAULT_NATIVE_FPS`] when the expression is
    /// missing or not a positive number.
    #[must_use]
    pub fn frame_rate_or_default(&self) -> f64 {
        parse_fraction(self.frame_rate.as_deref())
            .filter(|fps| fps.is_finite() && *fps > 0.0)
            .unwrap_or(DEFAULT_NATIVE_FPS)
    }
}

/// Something that can read [`VideoMetadata`] from a file.
pub trait MediaProber {
    /// Probes `path` for its first video stream.
    fn probe(&self, path: &Path) -> CoreResult<VideoMetadata>;
}

/// [`MediaProber`] backed by the `ffprobe` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfprobeProber;

impl MediaProber for FfprobeProber {
    fn probe(&self, path: &Path) -> CoreResult<VideoMetadata> {
        log::debug!("Running ffprobe (via crate) on: {}", path.display());

        let metadata = ffprobe(path).map_err(|err| {
            log::error!("ffprobe failed on {}: {err:?}", path.display());
            map_ffprobe_error(path, err)
        })?;

        let video_stream = metadata
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| probe_failure(path, "no video stream found"))?;

        let duration_secs = metadata
            .format
            .duration
            .as_deref()
            .and_then(|d| d.parse::<f64>().ok())
            .or_else(|| {
                video_stream
                    .duration
                    .as_deref()
                    .and_then(|d| d.parse::<f64>().ok())
            })
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or_else(|| probe_failure(path, "could not determine a positive duration"))?;

        let width = positive_dimension(video_stream.width)
            .ok_or_else(|| probe_failure(path, "video stream is missing a valid width"))?;
        let height = positive_dimension(video_stream.height)
            .ok_or_else(|| probe_failure(path, "video stream is missing a valid height"))?;

        let frame_rate = [&video_stream.r_frame_rate, &video_stream.avg_frame_rate]
            .into_iter()
            .find(|rate| !rate.is_empty() && rate.as_str() != "0/0")
            .cloned();

        let info = VideoMetadata {
            duration_secs,
            width,
            height,
            frame_rate,
        };
        log::debug!("Probed {}: {info:?}", path.display());
        Ok(info)
    }
}

fn positive_dimension(value: Option<i64>) -> Option<u32> {
    value
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
}

fn map_ffprobe_error(path: &Path, err: FfProbeError) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => probe_failure(path, format!("could not run ffprobe: {io_err}")),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .map_or_else(|| format!("ffprobe exited with {}", output.status), str::to_string);
            probe_failure(path, reason)
        }
        FfProbeError::Deserialize(err) => {
            probe_failure(path, format!("unreadable ffprobe output: {err}"))
        }
        other => probe_failure(path, format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(rate: Option<&str>) -> VideoMetadata {
        VideoMetadata {
            duration_secs: 60.0,
            width: 1280,
            height: 720,
            frame_rate: rate.map(str::to_string),
        }
    }

    #[test]
    fn test_frame_rate_or_default() {
        assert!((meta(Some("30000/1001")).frame_rate_or_default() - 29.97).abs() < 0.01);
        assert_eq!(meta(Some("25/1")).frame_rate_or_default(), 25.0);
        assert_eq!(meta(None).frame_rate_or_default(), 30.0);
        assert_eq!(meta(Some("garbage")).frame_rate_or_default(), 30.0);
        assert_eq!(meta(Some("0/0")).frame_rate_or_default(), 30.0);
    }

    #[test]
    fn test_positive_dimension() {
        assert_eq!(positive_dimension(Some(1920)), Some(1920));
        assert_eq!(positive_dimension(Some(0)), None);
        assert_eq!(positive_dimension(Some(-4)), None);
        assert_eq!(positive_dimension(None), None);
    }

    #[test]
    fn test_missing_ffprobe_is_probe_failure() {
        let err = map_ffprobe_error(
            Path::new("/videos/in.mp4"),
            FfProbeError::Io(std::io::Error::from(std::io::ErrorKind::NotFound)),
        );
        match err {
            CoreError::ProbeFailure { path, reason } => {
                assert_eq!(path, "/videos/in.mp4");
                assert!(reason.starts_with("could not run ffprobe"), "reason: {reason}");
            }
            other => panic!("expected ProbeFailure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_ffprobe_status_keeps_last_stderr_line() {
        use std::os::unix::process::ExitStatusExt;
        use std::process::{ExitStatus, Output};

        let output = Output {
            status: ExitStatus::from_raw(1 << 8),
            stdout: Vec::new(),
            stderr: b"ffprobe version 6.1\n/videos/in.mp4: Invalid data found when processing input\n\n"
                .to_vec(),
        };
        let err = map_ffprobe_error(Path::new("/videos/in.mp4"), FfProbeError::Status(output));
        assert_eq!(
            err.to_string(),
            "Failed to probe '/videos/in.mp4': /videos/in.mp4: Invalid data found when processing input"
        );
    }
}
