/// Diarized Transcript to SRT Converter
///
/// Turns speech-to-text API responses with speaker diarization into
/// speaker-tagged SubRip (SRT) subtitle files.

pub mod config;
pub mod convert;
pub mod srt;
pub mod transcript;

#[cfg(feature = "api")]
pub mod api;

// Re-export main types for easy access
pub use crate::config::{Config, ConfigBuilder, InvalidSegmentPolicy, MissingEntriesPolicy};
pub use crate::convert::Converter;
pub use crate::srt::{SrtCue, SrtGenerator};
pub use crate::transcript::{DiarizedEntry, DiarizedTranscript, SttResponse};

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Error types for conversion operations
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("failed to parse input JSON: {0}")]
    Parse(String),

    #[error("no diarized transcript entries found in response")]
    MissingTranscript,

    #[error("invalid segment {index}: {reason}")]
    InvalidSegment { index: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Parse(err.to_string())
    }
}
