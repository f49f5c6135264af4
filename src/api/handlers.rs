//! API request handlers

use serde_json::Value;

use super::models::{ConvertOutcome, CuePreview};
use crate::convert::Converter;
use crate::srt::format_timestamp;
use crate::transcript::SttResponse;
use crate::Result;

/// Handle health check requests
pub async fn health_check() -> Value {
    serde_json::json!({
        "status": "healthy",
        "service": "diarized-srt",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })
}

/// Run a conversion for the UI: cue preview rows plus the full SRT text
pub async fn convert(converter: &Converter, payload: Value) -> Result<ConvertOutcome> {
    let response = SttResponse::from_value(payload)?;
    let generator = converter.build_cues(&response)?;

    let cues = generator
        .cues()
        .iter()
        .map(|cue| CuePreview {
            index: cue.index,
            start: format_timestamp(cue.start),
            end: format_timestamp(cue.end),
            text: cue.text.clone(),
        })
        .collect();

    Ok(ConvertOutcome {
        request_id: response.request_id.clone(),
        language_code: response.language_code.clone(),
        cue_count: generator.len(),
        cues,
        srt: generator.generate(),
    })
}
