//! Error type shared by the style, plot-object and rendering layers.

use std::path::PathBuf;

/// Errors produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A style option was rejected while building a profile.
    #[error("invalid style option `{option}`: {reason}")]
    Config { option: String, reason: String },

    /// A plot object was constructed from inconsistent or non-finite data.
    #[error("invalid plot data: {0}")]
    InvalidData(String),

    /// A legend referenced a plot object that is not registered on the canvas.
    #[error("plot object {0} is not registered on canvas `{1}`")]
    UnknownPlotObject(String, String),

    /// The output path has an extension no backend can write.
    #[error("unsupported output format `{0}` (expected .pdf or .svg)")]
    UnsupportedFormat(String),

    /// Random sampling from a closed-form function was impossible.
    #[error("cannot sample from `{0}`: {1}")]
    Sampling(String, String),

    /// Writing an output file failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The drawing backend reported a failure.
    #[error("render error: {0}")]
    Render(String),
}

impl Error {
    pub(crate) fn config(option: &str, reason: impl Into<String>) -> Self {
        Error::Config {
            option: option.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
