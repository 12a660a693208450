// ============================================================================
// giflapse-core/src/filter.rs
// ============================================================================
//
// FILTER GRAPH: Typed description of the ffmpeg filter pipeline
//
// The sampling plan is turned into a small typed value (frame selection,
// timestamp reset, scale target, palette settings) which is serialized into
// an ffmpeg -filter_complex string as a separate step. Keeping the two apart
// lets the selection semantics be tested without ffmpeg.
//
// PIPELINE:
//   select (greedy minimum-gap scan) -> setpts (constant output rate)
//   -> scale -> split -> palettegen (full stats) / paletteuse (dither)
//
// AI-ASSISTANT-INFO: Filter graph construction for timelapse GIF output

use crate::plan::SamplingPlan;
use crate::quality::QualityPreset;
use serde::Serialize;
use std::fmt;

/// Palette statistics mode; the whole stream contributes to one palette.
pub const PALETTE_STATS_MODE: &str = "full";

/// Source-time window and minimum spacing for frame selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionWindow {
    pub start: f64,
    pub end: f64,
    pub min_interval: f64,
}

impl SelectionWindow {
    /// Whether a frame at `t` is taken, given the previously taken frame.
    #[must_use]
    pub fn accepts(&self, t: f64, previous: Option<f64>) -> bool {
        if t < self.start || t > self.end {
            return false;
        }
        previous.is_none_or(|prev| t - prev >= self.min_interval)
    }

    /// Runs the selection over a stream of source frame timestamps, in
    /// decode order, and returns the timestamps that were selected.
    ///
    /// This mirrors what the serialized `select` expression does inside
    /// ffmpeg: a greedy forward scan, so the number of frames taken depends
    /// on where the source's frames actually fall.
    pub fn select<I>(&self, timestamps: I) -> Vec<f64>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut selected = Vec::new();
        let mut previous = None;
        for t in timestamps {
            if self.accepts(t, previous) {
                selected.push(t);
                previous = Some(t);
            }
        }
        selected
    }

    fn to_ffmpeg(&self) -> String {
        format!(
            "select='between(t,{},{})*(isnan(prev_selected_t)+gte(t-prev_selected_t,{}))'",
            self.start, self.end, self.min_interval
        )
    }
}

/// Resize target; height always follows the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleTarget {
    pub width: u32,
    pub algorithm: &'static str,
}

/// Palette generation and application settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteSpec {
    pub stats_mode: &'static str,
    pub dither: &'static str,
}

/// Complete description of the GIF filter pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterGraph {
    pub selection: SelectionWindow,
    pub output_fps: f64,
    pub scale: ScaleTarget,
    pub palette: PaletteSpec,
}

impl FilterGraph {
    /// Builds the graph for a plan.
    ///
    /// Without `scale_width` the source width is used, which keeps the
    /// pipeline shape identical whether or not the user resizes.
    #[must_use]
    pub fn build(
        plan: &SamplingPlan,
        output_fps: f64,
        scale_width: Option<u32>,
        source_width: u32,
        preset: QualityPreset,
    ) -> Self {
        Self {
            selection: SelectionWindow {
                start: plan.range_start,
                end: plan.range_end,
                min_interval: plan.sample_interval_secs,
            },
            output_fps,
            scale: ScaleTarget {
                width: scale_width.unwrap_or(source_width),
                algorithm: preset.scale_algorithm(),
            },
            palette: PaletteSpec {
                stats_mode: PALETTE_STATS_MODE,
                dither: preset.dither(),
            },
        }
    }

    /// Presentation time of the `index`-th selected frame (0-based).
    #[must_use]
    pub fn retimed(&self, index: u64) -> f64 {
        index as f64 / self.output_fps
    }

    /// Serializes the graph as an ffmpeg `-filter_complex` argument.
    #[must_use]
    pub fn to_ffmpeg(&self) -> String {
        format!(
            "[0:v]{select},setpts=N/({fps}*TB),scale={width}:-1:flags={algorithm},split[s0][s1];\
             [s0]palettegen=stats_mode={stats}[p];[s1][p]paletteuse=dither={dither}",
            select = self.selection.to_ffmpeg(),
            fps = self.output_fps,
            width = self.scale.width,
            algorithm = self.scale.algorithm,
            stats = self.palette.stats_mode,
            dither = self.palette.dither,
        )
    }
}

impl fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ffmpeg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::plan;

    fn default_graph() -> FilterGraph {
        let p = plan(60.0, 0.0, 5.0, 10.0).unwrap();
        FilterGraph::build(&p, 10.0, None, 1280, QualityPreset::High)
    }

    /// Frame timestamps of a constant-rate source.
    fn source_frames(duration: f64, fps: f64) -> impl Iterator<Item = f64> {
        let count = (duration * fps).floor() as u64;
        (0..=count).map(move |i| i as f64 / fps)
    }

    #[test]
    fn test_default_graph_values() {
        let g = default_graph();
        assert_eq!(g.scale.width, 1280);
        assert_eq!(g.scale.algorithm, "lanczos");
        assert_eq!(g.palette.dither, "sierra2_4a");
        assert_eq!(g.palette.stats_mode, "full");
        assert_eq!(g.selection.start, 0.0);
        assert_eq!(g.selection.end, 60.0);
    }

    #[test]
    fn test_explicit_width_overrides_source() {
        let p = plan(60.0, 0.0, 5.0, 10.0).unwrap();
        let g = FilterGraph::build(&p, 10.0, Some(480), 1280, QualityPreset::Low);
        assert_eq!(g.scale.width, 480);
        assert_eq!(g.scale.algorithm, "fast_bilinear");
        assert_eq!(g.palette.dither, "none");
    }

    #[test]
    fn test_ffmpeg_serialization() {
        let g = default_graph();
        assert_eq!(
            g.to_ffmpeg(),
            "[0:v]select='between(t,0,60)*(isnan(prev_selected_t)+gte(t-prev_selected_t,1.2))',\
             setpts=N/(10*TB),scale=1280:-1:flags=lanczos,split[s0][s1];\
             [s0]palettegen=stats_mode=full[p];[s1][p]paletteuse=dither=sierra2_4a"
        );
        assert_eq!(g.to_string(), g.to_ffmpeg());
    }

    #[test]
    fn test_medium_preset_serialization() {
        let p = plan(60.0, 0.0, 5.0, 10.0).unwrap();
        let g = FilterGraph::build(&p, 10.0, None, 640, QualityPreset::Medium);
        assert!(g.to_ffmpeg().contains("scale=640:-1:flags=bicubic"));
        assert!(g.to_ffmpeg().ends_with("paletteuse=dither=bayer:bayer_scale=3"));
    }

    #[test]
    fn test_selection_respects_min_gap() {
        let g = default_graph();
        let selected = g.selection.select(source_frames(60.0, 29.97));
        assert!(!selected.is_empty());
        for pair in selected.windows(2) {
            assert!(pair[1] - pair[0] >= g.selection.min_interval);
        }
    }

    #[test]
    fn test_selection_count_close_to_plan() {
        let g = default_graph();
        let selected = g.selection.select(source_frames(60.0, 30.0));
        // Greedy selection lands on discrete frames, so the count can drift.
        assert!((48..=51).contains(&selected.len()), "got {}", selected.len());
        assert_eq!(selected[0], 0.0);
    }

    #[test]
    fn test_selection_window_bounds() {
        let p = plan(60.0, 30.0, 5.0, 10.0).unwrap();
        let g = FilterGraph::build(&p, 10.0, None, 1280, QualityPreset::High);
        let selected = g.selection.select(source_frames(60.0, 25.0));
        assert!(selected.iter().all(|&t| (30.0..=60.0).contains(&t)));
        assert_eq!(selected[0], 30.0);
    }

    #[test]
    fn test_first_frame_in_range_is_taken() {
        let window = SelectionWindow {
            start: 1.0,
            end: 2.0,
            min_interval: 10.0,
        };
        assert_eq!(window.select([0.5, 1.01, 1.5, 1.99, 2.5]), vec![1.01]);
    }

    #[test]
    fn test_irregular_timestamps() {
        let window = SelectionWindow {
            start: 0.0,
            end: 10.0,
            min_interval: 1.0,
        };
        let selected = window.select([0.0, 0.4, 0.9, 1.3, 1.9, 2.2, 2.35, 3.4]);
        assert_eq!(selected, vec![0.0, 1.3, 2.35, 3.4]);
    }

    #[test]
    fn test_retimed_is_constant_rate() {
        let g = default_graph();
        let selected = g.selection.select(source_frames(60.0, 24.0));
        for (n, _) in selected.iter().enumerate() {
            assert!((g.retimed(n as u64) - n as f64 / 10.0).abs() < 1e-12);
        }
        assert_eq!(g.retimed(0), 0.0);
        assert_eq!(g.retimed(10), 1.0);
    }
}
