//! Error types for slide review.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or analyzing a presentation.
///
/// Only [`Error::Load`] escapes a full analysis run; everything below the
/// container level degrades to defaults instead of failing.
#[derive(Error, Debug)]
pub enum Error {
    /// The presentation at `path` could not be opened as a presentation container.
    #[error("Failed to load presentation '{}': {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// The package is a valid ZIP but not a usable presentation.
    #[error("PPTX parsing error: {0}")]
    PptxParse(String),

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// Input rejected before any parsing took place.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Wrap any error raised while opening `path` into a load failure.
    pub fn load(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
