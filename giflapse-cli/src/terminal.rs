// ============================================================================
// giflapse-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Section headers, key/value blocks and the progress bar
//
// Everything the user sees on a successful run is printed from here. Errors
// go through error::print_error instead.
//
// AI-ASSISTANT-INFO: Terminal UI components and styling for the CLI

use console::style;
use giflapse_core::{
    FilterGraph, SamplingPlan, TimelapseResult, VideoMetadata, format_bytes, format_duration,
    format_duration_seconds,
};
use indicatif::{ProgressBar, ProgressStyle};

use std::path::Path;
use std::time::Duration;

const LABEL_WIDTH: usize = 18;

/// Section header: dashes, cyan, upper case.
pub fn print_section(title: &str) {
    println!(
        "\n{}\n",
        style(format!("----- {} -----", title.to_uppercase())).cyan().bold()
    );
}

/// One indented `label: value` line.
pub fn print_status(label: &str, value: &str, emphasize: bool) {
    let value = if emphasize {
        style(value).green().bold().to_string()
    } else {
        value.to_string()
    };
    println!("  {:<LABEL_WIDTH$} {}", format!("{label}:"), value);
}

pub fn print_success(message: &str) {
    println!("  {} {}", style("✓").green().bold(), style(message).bold());
}

/// Input and output paths, printed before anything is probed.
pub fn print_header(input: &Path, output: &Path) {
    print_section("giflapse");
    print_status("Input", &input.display().to_string(), false);
    print_status("Output", &output.display().to_string(), false);
}

/// Source properties and the sampling decisions derived from them.
pub fn print_plan(metadata: &VideoMetadata, plan: &SamplingPlan, graph: &FilterGraph) {
    print_section("Source");
    print_status("Duration", &format_duration_seconds(metadata.duration_secs), false);
    print_status(
        "Resolution",
        &format!("{}x{}", metadata.width, metadata.height),
        false,
    );
    print_status(
        "Frame rate",
        &format!("{:.3} fps", metadata.frame_rate_or_default()),
        false,
    );

    print_section("Timelapse");
    print_status(
        "Range",
        &format!(
            "{} - {}",
            format_duration_seconds(plan.range_start),
            format_duration_seconds(plan.range_end)
        ),
        false,
    );
    print_status("Frames", &plan.output_frame_count.to_string(), true);
    print_status(
        "Interval",
        &format!("{:.3}s ({:.1}x speed-up)", plan.sample_interval_secs, plan.speedup()),
        false,
    );
    print_status("Frame rate", &format!("{} fps", graph.output_fps), false);
    print_status(
        "Scale",
        &format!("{}px wide ({})", graph.scale.width, graph.scale.algorithm),
        false,
    );
    print_status("Dither", graph.palette.dither, false);
}

/// Creates the encode progress bar (0-100). Hidden when stderr is not a terminal.
pub fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    match ProgressStyle::default_bar()
        .template("  Rendering: {percent:>3}% [{bar:30}] ({elapsed})")
    {
        Ok(bar_style) => pb.set_style(bar_style.progress_chars("##.")),
        Err(e) => log::debug!("Progress bar template rejected: {e}"),
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Final block after a successful conversion.
pub fn print_summary(result: &TimelapseResult) {
    print_section("Complete");
    print_success("Timelapse GIF created");
    println!();
    print_status("Output", &result.output_path.display().to_string(), true);
    print_status("Size", &format_bytes(result.output_size), false);
    print_status(
        "Playback",
        &format_duration_seconds(result.plan.output_playback_secs(result.graph.output_fps)),
        false,
    );
    print_status("Time taken", &format_duration(result.elapsed), false);
}
