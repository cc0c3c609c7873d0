//! Public types and constants for the visualization module.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Output file formats supported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Vector PDF with the standard Type 1 fonts.
    Pdf,
    /// SVG; text is written as Unicode with font family names.
    Svg,
}

impl OutputFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Number of tick labels requested per axis.
pub const AXIS_LABELS: usize = 6;

/// Slices used to draw the 2-D color scale.
pub const COLOR_SCALE_STEPS: usize = 64;

/// Width of the color scale as a fraction of the canvas width.
pub const COLOR_SCALE_WIDTH: f64 = 0.04;
