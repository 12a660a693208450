//! Core library for turning a video into a short timelapse GIF with ffmpeg.
//!
//! Frames are sampled evenly across the whole source (from an optional start
//! offset to the end), retimed to a constant output rate, scaled and
//! quantized against a palette generated from the sampled frames.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use giflapse_core::{QualityPreset, TimelapseConfigBuilder, create_timelapse};
//! use giflapse_core::external::{FfprobeProber, SidecarSpawner, check_engine};
//!
//! check_engine().unwrap();
//!
//! let config = TimelapseConfigBuilder::new("/path/to/input.mp4")
//!     .output_dir("/path/to/gifs")
//!     .start("1:30")
//!     .fps(12)
//!     .width(480)
//!     .quality(QualityPreset::Medium)
//!     .build();
//!
//! let result = create_timelapse(&config, &FfprobeProber, &SidecarSpawner, |_| {}).unwrap();
//! println!("{} frames -> {}", result.plan.output_frame_count, result.output_path.display());
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod filter;
pub mod framerate;
pub mod input;
pub mod plan;
pub mod processing;
pub mod progress_reporting;
pub mod quality;
pub mod time;
pub mod utils;

// Re-exports for public API
pub use config::{TimelapseConfig, TimelapseConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use external::{VideoMetadata, check_engine};
pub use filter::{FilterGraph, SelectionWindow};
pub use framerate::parse_fraction;
pub use input::RawValue;
pub use plan::{SamplingPlan, plan};
pub use processing::{
    PreparedTimelapse, TimelapseResult, create_timelapse, ensure_output_dir, prepare_timelapse,
    render_timelapse, resolve_output,
};
pub use quality::QualityPreset;
pub use time::parse_time;
pub use utils::{format_bytes, format_duration, format_duration_seconds, parse_ffmpeg_time};
