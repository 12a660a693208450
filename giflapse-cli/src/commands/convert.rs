// ============================================================================
// giflapse-cli/src/commands/convert.rs
// ============================================================================
//
// CONVERT COMMAND: Parsed arguments in, GIF out
//
// Order of operations matters for the exit behaviour: every check that does
// not need ffmpeg (option ranges, start offset, input extension, input
// existence, output collision) runs first, then the engine check, then the
// probe and the encode.
//
// AI-ASSISTANT-INFO: Implementation of the conversion command

use crate::cli::Cli;
use crate::error::CliResult;
use crate::terminal;

use giflapse_core::external::{FfprobeProber, SidecarSpawner};
use giflapse_core::{
    QualityPreset, TimelapseConfig, TimelapseResult, check_engine, prepare_timelapse,
    render_timelapse, resolve_output,
};
use log::{debug, info};

/// Maps parsed arguments onto a core configuration.
///
/// # Errors
///
/// Returns `UnknownQualityPreset` for anything but low/medium/high.
pub fn config_from_args(args: &Cli) -> CliResult<TimelapseConfig> {
    let quality: QualityPreset = args.quality.parse()?;
    Ok(TimelapseConfig {
        input_path: args.input.clone(),
        output_dir: args.output_dir.clone(),
        name: args.name.clone(),
        start: args.start.clone(),
        duration: args.duration,
        fps: args.fps,
        width: args.width,
        quality,
        overwrite: args.overwrite,
    })
}

/// Runs one conversion end to end.
///
/// # Errors
///
/// Any [`giflapse_core::CoreError`]; the caller turns it into exit code 1.
pub fn run_convert(args: &Cli) -> CliResult<TimelapseResult> {
    let config = config_from_args(args)?;
    debug!("Configuration: {config:?}");

    let output_path = resolve_output(&config)?;
    check_engine()?;

    terminal::print_header(&config.input_path, &output_path);

    let prepared = prepare_timelapse(&config, &FfprobeProber)?;
    terminal::print_plan(&prepared.metadata, &prepared.plan, &prepared.graph);
    println!();

    let pb = terminal::create_progress_bar();
    let rendered = render_timelapse(&config, prepared, &output_path, &SidecarSpawner, |percent| {
        pb.set_position(percent.round() as u64);
    });
    pb.finish_and_clear();
    let result = rendered?;

    info!(
        "Wrote {} frames to {}",
        result.plan.output_frame_count,
        result.output_path.display()
    );
    terminal::print_summary(&result);
    Ok(result)
}
