use serde::{Deserialize, Serialize};

use crate::Result;

/// Speech-to-text API response with optional diarization
///
/// All fields are optional at the serde layer so that any well-formed JSON
/// object decodes; structural requirements (present, non-empty entries) are
/// enforced by the converter where a policy decision can be applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttResponse {
    /// Request identifier assigned by the STT service
    #[serde(default)]
    pub request_id: Option<String>,
    /// Full transcript without speaker attribution
    #[serde(default)]
    pub transcript: Option<String>,
    /// Detected or requested language
    #[serde(default)]
    pub language_code: Option<String>,
    /// Speaker-attributed segments
    #[serde(default)]
    pub diarized_transcript: Option<DiarizedTranscript>,
}

/// Container for diarized segments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiarizedTranscript {
    #[serde(default)]
    pub entries: Vec<DiarizedEntry>,
}

/// One diarized utterance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiarizedEntry {
    /// Transcribed text for this utterance
    pub transcript: String,
    /// Start offset in seconds from the beginning of the audio
    pub start_time_seconds: f64,
    /// End offset in seconds
    pub end_time_seconds: f64,
    /// Speaker label, e.g. "SPEAKER_00"; empty when diarization did not
    /// attribute the segment
    #[serde(default)]
    pub speaker_id: String,
}

impl SttResponse {
    /// Decode a response from raw JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a response from an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Diarized entries, or an empty slice when diarization is absent
    pub fn entries(&self) -> &[DiarizedEntry] {
        self.diarized_transcript
            .as_ref()
            .map(|d| d.entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_entries(&self) -> bool {
        !self.entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "request_id": "req-123",
        "transcript": "Hello. And this is speaker one responding.",
        "language_code": "en-IN",
        "diarized_transcript": {
            "entries": [
                {
                    "transcript": "Hello, this is speaker zero.",
                    "start_time_seconds": 1.5,
                    "end_time_seconds": 4.2,
                    "speaker_id": "SPEAKER_00"
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_full_response() {
        let response = SttResponse::from_json_str(SAMPLE).unwrap();

        assert_eq!(response.request_id.as_deref(), Some("req-123"));
        assert_eq!(response.language_code.as_deref(), Some("en-IN"));
        assert!(response.has_entries());

        let entry = &response.entries()[0];
        assert_eq!(entry.speaker_id, "SPEAKER_00");
        assert_eq!(entry.start_time_seconds, 1.5);
        assert_eq!(entry.end_time_seconds, 4.2);
    }

    #[test]
    fn test_parse_without_diarization() {
        let response = SttResponse::from_json_str(r#"{"transcript": "just text"}"#).unwrap();

        assert!(!response.has_entries());
        assert!(response.entries().is_empty());
        assert_eq!(response.transcript.as_deref(), Some("just text"));
    }

    #[test]
    fn test_missing_speaker_id_defaults_to_empty() {
        let json = r#"{
            "diarized_transcript": {
                "entries": [
                    {"transcript": "hi", "start_time_seconds": 0.0, "end_time_seconds": 1.0}
                ]
            }
        }"#;
        let response = SttResponse::from_json_str(json).unwrap();
        assert_eq!(response.entries()[0].speaker_id, "");
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SttResponse::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, crate::ConvertError::Parse(_)));
    }

    #[test]
    fn test_from_value() {
        let value = serde_json::json!({
            "request_id": "abc",
            "diarized_transcript": {"entries": []}
        });
        let response = SttResponse::from_value(value).unwrap();
        assert_eq!(response.request_id.as_deref(), Some("abc"));
        assert!(!response.has_entries());
    }
}
