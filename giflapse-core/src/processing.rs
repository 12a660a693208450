// ============================================================================
// giflapse-core/src/processing.rs
// ============================================================================
//
// TIMELAPSE PROCESSING: One video in, one GIF out
//
// This module strings the pieces together for a single conversion:
// validation, output path resolution, probing, planning, filter graph
// construction and the ffmpeg run. Exactly one transcode is issued per call
// and nothing is retried.
//
// AI-ASSISTANT-INFO: Orchestration of a single timelapse conversion

use crate::config::TimelapseConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegSpawner, MediaProber, TranscodeRequest, VideoMetadata, run_transcode};
use crate::filter::FilterGraph;
use crate::plan::{SamplingPlan, plan};
use crate::time::parse_time;

use log::{debug, info};
use serde::Serialize;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Outcome of a successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct TimelapseResult {
    pub output_path: PathBuf,
    pub metadata: VideoMetadata,
    pub plan: SamplingPlan,
    pub graph: FilterGraph,
    #[serde(skip)]
    pub elapsed: Duration,
    pub output_size: u64,
}

/// Everything decided before ffmpeg is started.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedTimelapse {
    pub metadata: VideoMetadata,
    pub plan: SamplingPlan,
    pub graph: FilterGraph,
}

/// Checks the configuration and resolves the output path.
///
/// Fails with [`CoreError::OutputExists`] when the GIF is already there and
/// overwriting was not requested. The check is not a lock: another process
/// can still create the file before ffmpeg writes it.
///
/// # Errors
///
/// Any validation error from [`TimelapseConfig::validate`], plus
/// `OutputExists`.
pub fn resolve_output(config: &TimelapseConfig) -> CoreResult<PathBuf> {
    config.validate()?;
    let output_path = config.output_path();
    if output_path.exists() && !config.overwrite {
        return Err(CoreError::OutputExists(output_path.display().to_string()));
    }
    Ok(output_path)
}

/// Creates the output directory (and parents) for `output_path`.
///
/// # Errors
///
/// Returns [`CoreError::PathError`] when the directory cannot be created.
pub fn ensure_output_dir(output_path: &Path) -> CoreResult<()> {
    if let Some(dir) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| {
            CoreError::PathError(format!(
                "Failed to create output directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }
    Ok(())
}

/// Probes the source and computes the plan and filter graph.
///
/// # Errors
///
/// `ProbeFailure` from the prober, time parsing errors for the start
/// offset, and `RangeExhausted`/`InvalidOption` from the planner.
pub fn prepare_timelapse<P: MediaProber>(
    config: &TimelapseConfig,
    prober: &P,
) -> CoreResult<PreparedTimelapse> {
    let range_start = parse_time(config.start.as_str())?;
    let metadata = prober.probe(&config.input_path)?;
    debug!(
        "Source: {:.3}s, {}x{}, {:.3} fps",
        metadata.duration_secs,
        metadata.width,
        metadata.height,
        metadata.frame_rate_or_default()
    );

    let output_fps = f64::from(config.fps);
    let plan = plan(metadata.duration_secs, range_start, config.duration, output_fps)?;
    let graph = FilterGraph::build(
        &plan,
        output_fps,
        config.width,
        metadata.width,
        config.quality,
    );

    let prepared = PreparedTimelapse {
        metadata,
        plan,
        graph,
    };
    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(&prepared) {
            Ok(json) => debug!("Prepared timelapse: {json}"),
            Err(e) => debug!("Prepared timelapse (not serializable: {e}): {prepared:?}"),
        }
        debug!(
            "Nominal sample positions ({}): {}",
            plan.output_frame_count,
            describe_sample_positions(&plan)
        );
    }
    Ok(prepared)
}

/// Nominal source timestamps of every planned frame, in seconds, for the
/// debug plan report.
#[must_use]
pub fn describe_sample_positions(plan: &SamplingPlan) -> String {
    plan.nominal_timestamps()
        .map(|t| format!("{t:.3}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runs the ffmpeg encode for an already prepared conversion.
///
/// # Errors
///
/// `TranscodeFailure`/`CommandStart` from the transcoder, `PathError` when
/// the output directory cannot be created.
pub fn render_timelapse<S, F>(
    config: &TimelapseConfig,
    prepared: PreparedTimelapse,
    output_path: &Path,
    spawner: &S,
    on_progress: F,
) -> CoreResult<TimelapseResult>
where
    S: FfmpegSpawner,
    F: FnMut(f32),
{
    let start = Instant::now();
    ensure_output_dir(output_path)?;

    let request = TranscodeRequest {
        input_path: config.input_path.clone(),
        output_path: output_path.to_path_buf(),
        graph: prepared.graph,
        expected_output_secs: Some(prepared.plan.output_playback_secs(prepared.graph.output_fps)),
        overwrite: config.overwrite,
    };
    let output_path = run_transcode(spawner, &request, on_progress)?;

    let output_size = fs::metadata(&output_path).map(|m| m.len()).unwrap_or(0);
    let elapsed = start.elapsed();
    info!(
        "Created {} ({} frames planned) in {:.1}s",
        output_path.display(),
        prepared.plan.output_frame_count,
        elapsed.as_secs_f64()
    );

    Ok(TimelapseResult {
        output_path,
        metadata: prepared.metadata,
        plan: prepared.plan,
        graph: prepared.graph,
        elapsed,
        output_size,
    })
}

/// Converts one video into a timelapse GIF.
///
/// Validation happens before the prober or ffmpeg are touched. A failed
/// encode leaves whatever ffmpeg already wrote in place.
///
/// # Examples
///
/// ```rust,no_run
/// use giflapse_core::{TimelapseConfig, create_timelapse};
/// use giflapse_core::external::{FfprobeProber, SidecarSpawner};
/// use std::path::PathBuf;
///
/// let config = TimelapseConfig::new(PathBuf::from("/videos/drive.mp4"));
/// let result = create_timelapse(&config, &FfprobeProber, &SidecarSpawner, |pct| {
///     eprintln!("{pct:.0}%");
/// })
/// .unwrap();
/// println!("wrote {}", result.output_path.display());
/// ```
///
/// # Errors
///
/// Every error kind of [`CoreError`] except `EngineUnavailable`, which the
/// caller checks up front with [`crate::external::check_engine`].
pub fn create_timelapse<P, S, F>(
    config: &TimelapseConfig,
    prober: &P,
    spawner: &S,
    on_progress: F,
) -> CoreResult<TimelapseResult>
where
    P: MediaProber,
    S: FfmpegSpawner,
    F: FnMut(f32),
{
    let output_path = resolve_output(config)?;
    let prepared = prepare_timelapse(config, prober)?;
    render_timelapse(config, prepared, &output_path, spawner, on_progress)
}
