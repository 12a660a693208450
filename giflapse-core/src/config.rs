// ============================================================================
// giflapse-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Conversion Settings and Defaults
//
// This module defines the configuration structure for a single timelapse
// conversion together with the default constants used when the caller leaves
// an option unset. The CLI fills a TimelapseConfig from its flags; library
// users can use TimelapseConfigBuilder instead.
//
// KEY COMPONENTS:
// - TimelapseConfig: Everything one conversion needs to know
// - TimelapseConfigBuilder: Fluent construction with defaults
// - Default constants: durations, frame rates, supported formats
//
// AI-ASSISTANT-INFO: Configuration structures and constants for giflapse-core

// ---- Standard library imports ----
use std::path::{Path, PathBuf};

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::quality::QualityPreset;
use crate::time::parse_time;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Default start offset.
pub const DEFAULT_START: &str = "0";

/// Default requested GIF length in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 5.0;

/// Hard cap on the GIF length, whatever the user asks for.
pub const MAX_OUTPUT_DURATION_SECS: f64 = 5.0;

/// Default GIF frame rate.
pub const DEFAULT_FPS: u32 = 10;

/// Highest accepted GIF frame rate.
pub const MAX_FPS: u32 = 60;

/// Frame rate assumed when the source does not report a usable one.
pub const DEFAULT_NATIVE_FPS: f64 = 30.0;

/// Default quality preset.
pub const DEFAULT_QUALITY: QualityPreset = QualityPreset::High;

/// Accepted input extensions (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["mp4", "mov"];

/// Extension of every output file.
pub const OUTPUT_EXTENSION: &str = "gif";

// ============================================================================
// TIMELAPSE CONFIGURATION
// ============================================================================

/// Settings for one conversion.
///
/// # Examples
///
/// ```rust,no_run
/// use giflapse_core::TimelapseConfig;
/// use std::path::PathBuf;
///
/// let mut config = TimelapseConfig::new(PathBuf::from("/videos/holiday.mp4"));
/// config.fps = 15;
/// config.width = Some(480);
/// config.validate().unwrap();
/// assert_eq!(config.output_path(), PathBuf::from("/videos/holiday.gif"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimelapseConfig {
    // ---- Paths ----
    /// Source video (.mp4 or .mov)
    pub input_path: PathBuf,

    /// Directory for the GIF; defaults to the input's directory
    pub output_dir: Option<PathBuf>,

    /// Output base name; defaults to the input's file stem
    pub name: Option<String>,

    // ---- Sampling ----
    /// Start offset as typed by the user (SS, MM:SS or HH:MM:SS)
    pub start: String,

    /// Requested GIF length in seconds, capped at MAX_OUTPUT_DURATION_SECS
    pub duration: f64,

    /// GIF frame rate, 1..=MAX_FPS
    pub fps: u32,

    // ---- Output ----
    /// Target width; None keeps the source width
    pub width: Option<u32>,

    pub quality: QualityPreset,

    /// Replace an existing output file
    pub overwrite: bool,
}

impl TimelapseConfig {
    /// Creates a configuration with every option at its default.
    #[must_use]
    pub fn new(input_path: PathBuf) -> Self {
        Self {
            input_path,
            output_dir: None,
            name: None,
            start: DEFAULT_START.to_string(),
            duration: DEFAULT_DURATION_SECS,
            fps: DEFAULT_FPS,
            width: None,
            quality: DEFAULT_QUALITY,
            overwrite: false,
        }
    }

    /// Checks option ranges and the start offset. Does not touch the file
    /// system.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidOption`] describing the first bad option,
    /// or the time parsing error for a malformed `start`.
    pub fn validate_options(&self) -> CoreResult<()> {
        parse_time(self.start.as_str())?;
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(CoreError::InvalidOption(format!(
                "--duration must be a number greater than 0, got {}",
                self.duration
            )));
        }
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(CoreError::InvalidOption(format!(
                "--fps must be between 1 and {MAX_FPS}, got {}",
                self.fps
            )));
        }
        if self.width == Some(0) {
            return Err(CoreError::InvalidOption(
                "--width must be greater than 0".to_string(),
            ));
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(CoreError::InvalidOption("--name must not be empty".to_string()));
            }
            if name.contains(['/', '\\']) {
                return Err(CoreError::InvalidOption(format!(
                    "--name must be a file name, not a path: {name}"
                )));
            }
        }
        Ok(())
    }

    /// Validates options, the input extension and the input's existence.
    ///
    /// # Errors
    ///
    /// * [`CoreError::InvalidOption`] for out-of-range options
    /// * [`CoreError::UnsupportedFormat`] for anything but .mp4/.mov
    /// * [`CoreError::InputNotFound`] when the input is missing or not a file
    pub fn validate(&self) -> CoreResult<()> {
        self.validate_options()?;
        validate_input_extension(&self.input_path)?;
        if !self.input_path.is_file() {
            return Err(CoreError::InputNotFound(
                self.input_path.display().to_string(),
            ));
        }
        Ok(())
    }

    /// Directory the GIF is written to.
    #[must_use]
    pub fn effective_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            self.input_path
                .parent()
                .map(Path::to_path_buf)
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    /// Base name of the GIF, without extension.
    #[must_use]
    pub fn effective_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.input_path
                .file_stem()
                .map_or_else(|| "output".to_string(), |s| s.to_string_lossy().into_owned())
        })
    }

    /// `{output_dir}/{name}.gif`
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.effective_output_dir()
            .join(format!("{}.{OUTPUT_EXTENSION}", self.effective_name()))
    }
}

/// Rejects inputs whose extension is not in [`SUPPORTED_EXTENSIONS`].
///
/// # Errors
///
/// Returns [`CoreError::UnsupportedFormat`] naming the offending extension.
pub fn validate_input_extension(path: &Path) -> CoreResult<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if SUPPORTED_EXTENSIONS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(ext))
    {
        Ok(())
    } else if ext.is_empty() {
        Err(CoreError::UnsupportedFormat(path.display().to_string()))
    } else {
        Err(CoreError::UnsupportedFormat(format!(".{ext}")))
    }
}

// ============================================================================
// CONFIGURATION BUILDER
// ============================================================================

/// Fluent builder for [`TimelapseConfig`].
///
/// ```rust
/// use giflapse_core::{QualityPreset, TimelapseConfigBuilder};
///
/// let config = TimelapseConfigBuilder::new("clip.mov")
///     .output_dir("/tmp/gifs")
///     .name("preview")
///     .start("1:30")
///     .fps(12)
///     .quality(QualityPreset::Medium)
///     .build();
/// assert_eq!(config.output_path().to_str(), Some("/tmp/gifs/preview.gif"));
/// ```
#[derive(Debug, Clone)]
pub struct TimelapseConfigBuilder {
    config: TimelapseConfig,
}

impl TimelapseConfigBuilder {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            config: TimelapseConfig::new(input_path.into()),
        }
    }

    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.config.start = start.into();
        self
    }

    #[must_use]
    pub fn duration(mut self, seconds: f64) -> Self {
        self.config.duration = seconds;
        self
    }

    #[must_use]
    pub fn fps(mut self, fps: u32) -> Self {
        self.config.fps = fps;
        self
    }

    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.config.width = Some(width);
        self
    }

    #[must_use]
    pub fn quality(mut self, quality: QualityPreset) -> Self {
        self.config.quality = quality;
        self
    }

    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn build(self) -> TimelapseConfig {
        self.config
    }
}
