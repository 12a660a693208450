//! Quality presets.
//!
//! Each preset fixes the scaler used when resizing and the dither mode used
//! when mapping frames onto the generated palette.

use crate::error::CoreError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Output quality preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    /// All presets, lowest first.
    pub const ALL: [QualityPreset; 3] = [
        QualityPreset::Low,
        QualityPreset::Medium,
        QualityPreset::High,
    ];

    /// ffmpeg `scale` filter `flags` value.
    #[must_use]
    pub fn scale_algorithm(self) -> &'static str {
        match self {
            QualityPreset::Low => "fast_bilinear",
            QualityPreset::Medium => "bicubic",
            QualityPreset::High => "lanczos",
        }
    }

    /// ffmpeg `paletteuse` filter `dither` value.
    #[must_use]
    pub fn dither(self) -> &'static str {
        match self {
            QualityPreset::Low => "none",
            QualityPreset::Medium => "bayer:bayer_scale=3",
            QualityPreset::High => "sierra2_4a",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QualityPreset::Low => "low",
            QualityPreset::Medium => "medium",
            QualityPreset::High => "high",
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityPreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QualityPreset::ALL
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownQualityPreset(s.to_string()))
    }
}
