//! API data models

use serde::{Deserialize, Serialize};

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// One row of the cue preview table
#[derive(Debug, Serialize, Deserialize)]
pub struct CuePreview {
    pub index: u32,
    pub start: String,
    pub end: String,
    /// Rendered cue body, speaker label included
    pub text: String,
}

/// Result of a conversion request
#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertOutcome {
    pub request_id: Option<String>,
    pub language_code: Option<String>,
    pub cue_count: usize,
    pub cues: Vec<CuePreview>,
    /// Full SRT document, ready for download
    pub srt: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}
