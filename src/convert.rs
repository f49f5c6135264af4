use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{Config, InvalidSegmentPolicy, MissingEntriesPolicy};
use crate::srt::{SrtCue, SrtGenerator};
use crate::transcript::{DiarizedEntry, SttResponse};
use crate::{ConvertError, Result};

/// Transcript-to-SRT converter
///
/// Pure over its input aside from the optional file write; each call is
/// independent, so a single converter may be shared freely.
#[derive(Debug, Clone)]
pub struct Converter {
    config: Config,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(Config::default())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert raw JSON text to SRT text
    pub fn convert_json_str(&self, json: &str) -> Result<String> {
        let response = SttResponse::from_json_str(json)?;
        self.convert(&response)
    }

    /// Convert an already-parsed JSON value to SRT text
    pub fn convert_value(&self, value: serde_json::Value) -> Result<String> {
        let response = SttResponse::from_value(value)?;
        self.convert(&response)
    }

    /// Convert a decoded response to SRT text
    pub fn convert(&self, response: &SttResponse) -> Result<String> {
        Ok(self.build_cues(response)?.generate())
    }

    /// Build the cue list for a response, applying the configured policies
    pub fn build_cues(&self, response: &SttResponse) -> Result<SrtGenerator> {
        let entries = response.entries();
        if entries.is_empty() {
            return self.fallback_cues(response);
        }

        let mut generator = SrtGenerator::new();
        let mut index: u32 = 0;

        for (i, entry) in entries.iter().enumerate() {
            if let Err(e) = validate_entry(i, entry) {
                match self.config.conversion.on_invalid_segment {
                    InvalidSegmentPolicy::Abort => return Err(e),
                    InvalidSegmentPolicy::Skip => {
                        warn!("⚠️  Skipping {}", e);
                        continue;
                    }
                }
            }

            index += 1;
            generator.push(SrtCue::from_seconds(
                index,
                entry.start_time_seconds,
                entry.end_time_seconds,
                &cue_text(entry),
            ));
        }

        Ok(generator)
    }

    /// Convert and write the SRT file, returning the path written
    ///
    /// When no output path is given, one is derived from the request id and
    /// the current local time under the configured output directory.
    pub async fn convert_to_file(
        &self,
        response: &SttResponse,
        output_path: Option<&Path>,
    ) -> Result<PathBuf> {
        let generator = self.build_cues(response)?;

        let path = match output_path {
            Some(path) => path.to_path_buf(),
            None => self.default_output_path(response),
        };

        generator.save_to_file(&path).await?;
        info!("✅ SRT file created at {} ({} cues)", path.display(), generator.len());

        Ok(path)
    }

    fn default_output_path(&self, response: &SttResponse) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let request_id = response.request_id.as_deref().unwrap_or("transcript");
        self.config
            .output
            .base_dir
            .join(format!("{}_{}.srt", request_id, timestamp))
    }

    fn fallback_cues(&self, response: &SttResponse) -> Result<SrtGenerator> {
        match self.config.conversion.missing_entries {
            MissingEntriesPolicy::Error => Err(ConvertError::MissingTranscript),
            MissingEntriesPolicy::FullTranscript => {
                let text = response.transcript.as_deref().map(str::trim).unwrap_or("");
                if text.is_empty() {
                    return Err(ConvertError::MissingTranscript);
                }

                info!("📝 No diarized entries; emitting full transcript as a single cue");
                let mut generator = SrtGenerator::new();
                generator.push(SrtCue::from_seconds(
                    1,
                    0.0,
                    self.config.conversion.fallback_duration_seconds,
                    text,
                ));
                Ok(generator)
            }
        }
    }
}

/// Render the cue body, prefixing the speaker label when one is present
fn cue_text(entry: &DiarizedEntry) -> String {
    if entry.speaker_id.is_empty() {
        entry.transcript.clone()
    } else {
        format!("[{}]: {}", entry.speaker_id, entry.transcript)
    }
}

fn validate_entry(index: usize, entry: &DiarizedEntry) -> Result<()> {
    let invalid = |reason: &str| ConvertError::InvalidSegment {
        index,
        reason: reason.to_string(),
    };

    if !entry.start_time_seconds.is_finite() || !entry.end_time_seconds.is_finite() {
        return Err(invalid("timestamps must be finite numbers"));
    }
    if entry.start_time_seconds < 0.0 {
        return Err(invalid("start_time_seconds is negative"));
    }
    if entry.end_time_seconds <= entry.start_time_seconds {
        return Err(invalid(
            "end_time_seconds must be greater than start_time_seconds",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;

    fn entry(text: &str, start: f64, end: f64, speaker: &str) -> serde_json::Value {
        serde_json::json!({
            "transcript": text,
            "start_time_seconds": start,
            "end_time_seconds": end,
            "speaker_id": speaker,
        })
    }

    fn response_with(entries: Vec<serde_json::Value>) -> SttResponse {
        SttResponse::from_value(serde_json::json!({
            "request_id": "req-1",
            "transcript": "full text",
            "diarized_transcript": {"entries": entries},
        }))
        .unwrap()
    }

    #[test]
    fn test_end_to_end_example() {
        let response = response_with(vec![
            entry("Hello, this is speaker zero.", 1.5, 4.2, "SPEAKER_00"),
            entry("And this is speaker one responding.", 4.8, 7.3, "SPEAKER_01"),
        ]);

        let srt = Converter::with_defaults().convert(&response).unwrap();
        assert_eq!(
            srt,
            "1\n00:00:01,500 --> 00:00:04,200\n[SPEAKER_00]: Hello, this is speaker zero.\n\n\
             2\n00:00:04,800 --> 00:00:07,300\n[SPEAKER_01]: And this is speaker one responding.\n\n"
        );
    }

    #[test]
    fn test_cue_count_and_order() {
        let entries: Vec<_> = (0..25)
            .map(|i| entry(&format!("utterance {i}"), i as f64, i as f64 + 0.9, "SPEAKER_00"))
            .collect();
        let response = response_with(entries);

        let converter = Converter::with_defaults();
        let cues = converter.build_cues(&response).unwrap();

        assert_eq!(cues.len(), 25);
        for (i, cue) in cues.cues().iter().enumerate() {
            assert_eq!(cue.index, i as u32 + 1);
            assert!(cue.text.contains(&format!("utterance {i}")));
        }
    }

    #[test]
    fn test_idempotence() {
        let response = response_with(vec![entry("hi", 0.0, 1.25, "SPEAKER_00")]);
        let converter = Converter::with_defaults();

        let first = converter.convert(&response).unwrap();
        let second = converter.convert(&response).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_start_formats_as_zero() {
        let response = response_with(vec![entry("hi", 0.0, 1.0, "S")]);
        let srt = Converter::with_defaults().convert(&response).unwrap();
        assert!(srt.contains("00:00:00,000 --> 00:00:01,000"));
    }

    #[test]
    fn test_inverted_timestamps_abort() {
        let response = response_with(vec![
            entry("ok", 0.0, 1.0, "S"),
            entry("bad", 5.0, 5.0, "S"),
        ]);

        let err = Converter::with_defaults().convert(&response).unwrap_err();
        match err {
            ConvertError::InvalidSegment { index, .. } => assert_eq!(index, 1),
            other => panic!("expected InvalidSegment, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_start_abort() {
        let response = response_with(vec![entry("bad", -0.5, 1.0, "S")]);
        assert!(matches!(
            Converter::with_defaults().convert(&response),
            Err(ConvertError::InvalidSegment { index: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite_timestamp_abort() {
        // JSON cannot represent NaN (the json! macro lowers it to null), so the
        // entry is constructed directly to exercise the finite-timestamp guard.
        let response = SttResponse {
            request_id: Some("req-1".to_string()),
            transcript: Some("full text".to_string()),
            language_code: None,
            diarized_transcript: Some(crate::transcript::DiarizedTranscript {
                entries: vec![DiarizedEntry {
                    transcript: "bad".to_string(),
                    start_time_seconds: f64::NAN,
                    end_time_seconds: 1.0,
                    speaker_id: "S".to_string(),
                }],
            }),
        };
        assert!(matches!(
            Converter::with_defaults().convert(&response),
            Err(ConvertError::InvalidSegment { index: 0, .. })
        ));
    }

    #[test]
    fn test_skip_policy_renumbers_densely() {
        let config = ConfigBuilder::new()
            .with_invalid_segment_policy(InvalidSegmentPolicy::Skip)
            .build();
        let response = response_with(vec![
            entry("first", 0.0, 1.0, "S"),
            entry("bad", 3.0, 2.0, "S"),
            entry("third", 4.0, 5.0, "S"),
        ]);

        let cues = Converter::new(config).build_cues(&response).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues.cues()[0].index, 1);
        assert_eq!(cues.cues()[1].index, 2);
        assert!(cues.cues()[1].text.contains("third"));
    }

    #[test]
    fn test_missing_entries_is_an_error_by_default() {
        let response = SttResponse::from_value(serde_json::json!({
            "transcript": "only the flat text",
        }))
        .unwrap();
        assert!(matches!(
            Converter::with_defaults().convert(&response),
            Err(ConvertError::MissingTranscript)
        ));

        // empty entry list is the same condition
        let response = response_with(vec![]);
        assert!(matches!(
            Converter::with_defaults().convert(&response),
            Err(ConvertError::MissingTranscript)
        ));
    }

    #[test]
    fn test_full_transcript_fallback() {
        let config = ConfigBuilder::new()
            .with_missing_entries_policy(MissingEntriesPolicy::FullTranscript)
            .with_fallback_duration(7.5)
            .build();
        let response = SttResponse::from_value(serde_json::json!({
            "transcript": "  the whole recording in one line  ",
        }))
        .unwrap();

        let srt = Converter::new(config).convert(&response).unwrap();
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:07,500\nthe whole recording in one line\n\n"
        );
    }

    #[test]
    fn test_fallback_without_transcript_still_errors() {
        let config = ConfigBuilder::new()
            .with_missing_entries_policy(MissingEntriesPolicy::FullTranscript)
            .build();
        let response = SttResponse::from_value(serde_json::json!({})).unwrap();

        assert!(matches!(
            Converter::new(config).convert(&response),
            Err(ConvertError::MissingTranscript)
        ));
    }

    #[test]
    fn test_empty_speaker_id_has_no_label() {
        let response = response_with(vec![entry("unattributed line", 0.0, 1.0, "")]);
        let srt = Converter::with_defaults().convert(&response).unwrap();
        assert!(srt.contains("\nunattributed line\n"));
        assert!(!srt.contains('['));
    }

    #[test]
    fn test_multiline_transcript_is_collapsed() {
        let response = response_with(vec![entry("line one\n\nline two", 0.0, 1.0, "S")]);
        let srt = Converter::with_defaults().convert(&response).unwrap();
        assert!(srt.contains("[S]: line one line two\n"));
    }

    #[test]
    fn test_convert_json_str_rejects_malformed_input() {
        let err = Converter::with_defaults()
            .convert_json_str("{\"diarized_transcript\": ")
            .unwrap_err();
        assert!(matches!(err, ConvertError::Parse(_)));
    }
}
