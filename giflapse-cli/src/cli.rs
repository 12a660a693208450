// giflapse-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use giflapse_core::config::{DEFAULT_DURATION_SECS, DEFAULT_FPS, DEFAULT_START};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "giflapse",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Giflapse: turn a video into a short timelapse GIF",
    long_about = "Samples frames evenly across a video (from an optional start offset to the end) \
                  and renders them as a looping GIF using ffmpeg."
)]
pub struct Cli {
    /// Input video file (.mp4 or .mov)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for the GIF (defaults to the input's directory)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output file name without extension (defaults to the input's name)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Where sampling starts: SS, MM:SS or HH:MM:SS
    #[arg(long, value_name = "TIME", default_value = DEFAULT_START, allow_hyphen_values = true)]
    pub start: String,

    /// GIF length in seconds (at most 5)
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_DURATION_SECS)]
    pub duration: f64,

    /// GIF frame rate, 1 to 60
    #[arg(long, value_name = "FPS", default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Output width in pixels; height keeps the aspect ratio (defaults to source width)
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Quality preset: low, medium or high
    #[arg(long, value_name = "PRESET", default_value = "high")]
    pub quality: String,

    /// Replace the output file if it already exists
    #[arg(long)]
    pub overwrite: bool,
}
