//! FFmpeg command building and execution for GIF output.
//!
//! A single ffmpeg run decodes the source, applies the filter graph (frame
//! selection, retiming, scaling, palette) and muxes the GIF. Progress is
//! forwarded to a caller-supplied closure; the call returns once ffmpeg has
//! exited.

use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner};
use crate::filter::FilterGraph;
use crate::progress_reporting::TranscodeProgressHandler;

use ffmpeg_sidecar::command::FfmpegCommand;
use log::{debug, info};

use std::path::PathBuf;

/// Container format handed to ffmpeg's `-f`.
pub const OUTPUT_FORMAT: &str = "gif";

/// Everything ffmpeg needs for one GIF encode.
#[derive(Debug, Clone)]
pub struct TranscodeRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub graph: FilterGraph,
    /// Expected GIF playback length, used as the progress denominator.
    pub expected_output_secs: Option<f64>,
    pub overwrite: bool,
}

/// Builds the ffmpeg command for a request.
#[must_use]
pub fn build_gif_command(request: &TranscodeRequest) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner();
    if request.overwrite {
        cmd.overwrite();
    } else {
        cmd.no_overwrite();
    }
    cmd.input(request.input_path.to_string_lossy().as_ref());
    cmd.filter_complex(request.graph.to_ffmpeg());
    cmd.format(OUTPUT_FORMAT);
    cmd.output(request.output_path.to_string_lossy().as_ref());
    cmd
}

/// Runs the GIF encode and waits for ffmpeg to exit.
///
/// `on_progress` receives percentages in `[0, 100]`, never decreasing.
/// A partially written output is left in place on failure.
///
/// # Errors
///
/// * [`CoreError::CommandStart`] when ffmpeg cannot be spawned
/// * [`CoreError::TranscodeFailure`] when ffmpeg exits unsuccessfully, with
///   the error lines it printed
pub fn run_transcode<S, F>(
    spawner: &S,
    request: &TranscodeRequest,
    on_progress: F,
) -> CoreResult<PathBuf>
where
    S: FfmpegSpawner,
    F: FnMut(f32),
{
    info!(
        "Starting GIF encode: {} -> {}",
        request.input_path.display(),
        request.output_path.display()
    );
    debug!("Filter graph: {}", request.graph);

    let cmd = build_gif_command(request);
    debug!("FFmpeg command: {cmd:?}");

    let mut process = spawner.launch(cmd)?;
    let mut handler = TranscodeProgressHandler::new(request.expected_output_secs, on_progress);
    let events_result = process.drain_events(|event| handler.handle_event(event));
    let status = process.finish()?;
    events_result?;

    if status.success() {
        handler.report(100.0);
        info!("GIF encode finished: {}", request.output_path.display());
        Ok(request.output_path.clone())
    } else {
        let stderr = handler.stderr_buffer().trim().to_string();
        if stderr.contains("already exists") {
            return Err(CoreError::OutputExists(
                request.output_path.display().to_string(),
            ));
        }
        Err(command_failed_error("ffmpeg", status, stderr))
    }
}
