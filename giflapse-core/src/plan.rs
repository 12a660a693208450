// ============================================================================
// giflapse-core/src/plan.rs
// ============================================================================
//
// SAMPLING PLAN: Which source instants become GIF frames
//
// Given the source duration, a start offset, the requested GIF length and
// the output frame rate, this module decides how many frames the GIF gets and
// how far apart (in source seconds) consecutive samples must be. The frames
// are spread evenly over [start, end of video].
//
// AI-ASSISTANT-INFO: Sampling-interval computation for timelapse GIFs

use crate::config::{MAX_FPS, MAX_OUTPUT_DURATION_SECS};
use crate::error::{CoreError, CoreResult};
use serde::Serialize;

/// Immutable result of [`plan`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingPlan {
    /// First source instant eligible for sampling, in seconds.
    pub range_start: f64,
    /// Last source instant eligible for sampling (the source duration).
    pub range_end: f64,
    /// `range_end - range_start`, always positive.
    pub range_duration: f64,
    /// Requested GIF length after applying the cap.
    pub output_duration_secs: f64,
    /// Number of frames the GIF is planned to contain.
    pub output_frame_count: u64,
    /// Minimum source-time gap between two selected frames.
    pub sample_interval_secs: f64,
}

/// Computes the sampling plan for one conversion.
///
/// The requested duration is capped at [`MAX_OUTPUT_DURATION_SECS`]. The last
/// nominal sample can land slightly short of the source end due to rounding;
/// that is accepted as is.
///
/// # Errors
///
/// * [`CoreError::RangeExhausted`] when `range_start` is at or past the end
///   of the source, or when the plan would contain no frames
/// * [`CoreError::InvalidOption`] for non-positive durations or an output
///   frame rate outside `(0, 60]`
///
/// # Examples
///
/// ```
/// use giflapse_core::plan;
///
/// let p = plan(60.0, 0.0, 5.0, 10.0).unwrap();
/// assert_eq!(p.output_frame_count, 50);
/// assert!((p.sample_interval_secs - 1.2).abs() < 1e-9);
/// ```
pub fn plan(
    source_duration: f64,
    range_start: f64,
    requested_output_duration: f64,
    output_fps: f64,
) -> CoreResult<SamplingPlan> {
    if !source_duration.is_finite() || source_duration <= 0.0 {
        return Err(CoreError::InvalidOption(format!(
            "source duration must be positive, got {source_duration}"
        )));
    }
    if !range_start.is_finite() || range_start < 0.0 {
        return Err(CoreError::InvalidOption(format!(
            "start time must be a non-negative number of seconds, got {range_start}"
        )));
    }
    if !requested_output_duration.is_finite() || requested_output_duration <= 0.0 {
        return Err(CoreError::InvalidOption(format!(
            "duration must be greater than 0, got {requested_output_duration}"
        )));
    }
    if !output_fps.is_finite() || output_fps <= 0.0 || output_fps > f64::from(MAX_FPS) {
        return Err(CoreError::InvalidOption(format!(
            "fps must be in (0, {MAX_FPS}], got {output_fps}"
        )));
    }

    let range_duration = source_duration - range_start;
    if range_duration <= 0.0 {
        return Err(CoreError::RangeExhausted {
            start: range_start,
            duration: source_duration,
        });
    }

    let output_duration_secs = requested_output_duration.min(MAX_OUTPUT_DURATION_SECS);
    let output_frame_count = (output_duration_secs * output_fps).ceil() as u64;
    if output_frame_count == 0 {
        return Err(CoreError::RangeExhausted {
            start: range_start,
            duration: source_duration,
        });
    }

    let sample_interval_secs = range_duration / output_frame_count as f64;

    log::debug!(
        "Sampling plan: {output_frame_count} frames over {range_start:.3}s..{source_duration:.3}s, \
         one every {sample_interval_secs:.4}s"
    );

    Ok(SamplingPlan {
        range_start,
        range_end: source_duration,
        range_duration,
        output_duration_secs,
        output_frame_count,
        sample_interval_secs,
    })
}

impl SamplingPlan {
    /// Nominal sample positions `range_start + i * interval`, one per planned
    /// frame. The decoder picks the nearest real frames at or after these.
    pub fn nominal_timestamps(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.output_frame_count)
            .map(move |i| self.range_start + i as f64 * self.sample_interval_secs)
    }

    /// Playback length of the GIF at `output_fps`.
    #[must_use]
    pub fn output_playback_secs(&self, output_fps: f64) -> f64 {
        if output_fps > 0.0 {
            self.output_frame_count as f64 / output_fps
        } else {
            0.0
        }
    }

    /// Source seconds compressed into one second of GIF playback.
    #[must_use]
    pub fn speedup(&self) -> f64 {
        if self.output_duration_secs > 0.0 {
            self.range_duration / self.output_duration_secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_plan_for_one_minute() {
        let p = plan(60.0, 0.0, 5.0, 10.0).unwrap();
        assert_eq!(p.output_duration_secs, 5.0);
        assert_eq!(p.output_frame_count, 50);
        assert!(approx(p.sample_interval_secs, 1.2));
        assert_eq!(p.range_start, 0.0);
        assert_eq!(p.range_end, 60.0);
        assert_eq!(p.range_duration, 60.0);
    }

    #[test]
    fn test_duration_is_capped() {
        let p = plan(60.0, 0.0, 10.0, 10.0).unwrap();
        assert_eq!(p.output_duration_secs, 5.0);
        assert_eq!(p.output_frame_count, 50);
    }

    #[test]
    fn test_shorter_request_is_honoured() {
        let p = plan(60.0, 0.0, 2.5, 10.0).unwrap();
        assert_eq!(p.output_duration_secs, 2.5);
        assert_eq!(p.output_frame_count, 25);
        assert!(approx(p.sample_interval_secs, 2.4));
    }

    #[test]
    fn test_frame_count_rounds_up() {
        let p = plan(10.0, 0.0, 1.05, 10.0).unwrap();
        assert_eq!(p.output_frame_count, 11);
    }

    #[test]
    fn test_start_offset_shrinks_range() {
        let p = plan(60.0, 30.0, 5.0, 10.0).unwrap();
        assert_eq!(p.range_duration, 30.0);
        assert!(approx(p.sample_interval_secs, 0.6));
    }

    #[test]
    fn test_range_exhausted() {
        assert!(matches!(
            plan(60.0, 60.0, 5.0, 10.0),
            Err(CoreError::RangeExhausted { .. })
        ));
        assert!(matches!(
            plan(60.0, 75.0, 5.0, 10.0),
            Err(CoreError::RangeExhausted { .. })
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(plan(0.0, 0.0, 5.0, 10.0), Err(CoreError::InvalidOption(_))));
        assert!(matches!(plan(60.0, -1.0, 5.0, 10.0), Err(CoreError::InvalidOption(_))));
        assert!(matches!(plan(60.0, 0.0, 0.0, 10.0), Err(CoreError::InvalidOption(_))));
        assert!(matches!(plan(60.0, 0.0, 5.0, 0.0), Err(CoreError::InvalidOption(_))));
        assert!(matches!(plan(60.0, 0.0, 5.0, 61.0), Err(CoreError::InvalidOption(_))));
        assert!(matches!(plan(f64::NAN, 0.0, 5.0, 10.0), Err(CoreError::InvalidOption(_))));
    }

    #[test]
    fn test_nominal_timestamps_cover_range() {
        let p = plan(60.0, 0.0, 5.0, 10.0).unwrap();
        let stamps: Vec<f64> = p.nominal_timestamps().collect();
        assert_eq!(stamps.len(), 50);
        assert_eq!(stamps[0], 0.0);
        assert!(approx(stamps[1], 1.2));
        assert!(stamps.iter().all(|&t| t < p.range_end));
        assert!(approx(stamps[49], 58.8));
    }

    #[test]
    fn test_playback_and_speedup() {
        let p = plan(60.0, 0.0, 5.0, 10.0).unwrap();
        assert!(approx(p.output_playback_secs(10.0), 5.0));
        assert!(approx(p.speedup(), 12.0));
        assert_eq!(p.output_playback_secs(0.0), 0.0);
    }
}
