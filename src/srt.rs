use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::{ConvertError, Result};

/// SRT (SubRip Subtitle) cue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrtCue {
    /// Sequential 1-based number
    pub index: u32,
    /// Start timestamp
    pub start: Duration,
    /// End timestamp
    pub end: Duration,
    /// Cue body; single line, never blank (blank lines separate cues)
    pub text: String,
}

impl SrtCue {
    /// Create a new cue; the text is trimmed and internal whitespace
    /// collapsed so the body cannot contain a cue separator
    pub fn new(index: u32, start: Duration, end: Duration, text: &str) -> Self {
        Self {
            index,
            start,
            end,
            text: clean_text(text),
        }
    }

    /// Create a cue from fractional-second offsets
    pub fn from_seconds(index: u32, start_seconds: f64, end_seconds: f64, text: &str) -> Self {
        Self::new(
            index,
            duration_from_seconds(start_seconds),
            duration_from_seconds(end_seconds),
            text,
        )
    }
}

impl fmt::Display for SrtCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{} --> {}\n{}\n",
            self.index,
            format_timestamp(self.start),
            format_timestamp(self.end),
            self.text
        )
    }
}

/// SRT document builder
#[derive(Debug, Clone, Default)]
pub struct SrtGenerator {
    cues: Vec<SrtCue>,
}

impl SrtGenerator {
    pub fn new() -> Self {
        Self { cues: Vec::new() }
    }

    /// Append a cue
    pub fn push(&mut self, cue: SrtCue) {
        self.cues.push(cue);
    }

    /// Render the full SRT document
    ///
    /// Each cue block is followed by a blank line, including the last one.
    pub fn generate(&self) -> String {
        let mut srt_content = String::new();

        for cue in &self.cues {
            srt_content.push_str(&cue.to_string());
            srt_content.push('\n');
        }

        srt_content
    }

    /// Write the document to a file as UTF-8, creating parent directories
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, self.generate()).await?;
        Ok(())
    }

    /// End timestamp of the last-ending cue
    pub fn total_duration(&self) -> Duration {
        self.cues
            .iter()
            .map(|cue| cue.end)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn cues(&self) -> &[SrtCue] {
        &self.cues
    }
}

/// Convert fractional seconds to a Duration with millisecond resolution
///
/// Milliseconds are rounded to nearest (half away from zero), not
/// truncated.
pub fn duration_from_seconds(seconds: f64) -> Duration {
    Duration::from_millis((seconds * 1000.0).round() as u64)
}

/// Format a duration as an SRT timestamp (HH:MM:SS,mmm)
///
/// Hours are not wrapped at 24; a transcript longer than a day keeps
/// counting up.
pub fn format_timestamp(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1_000;
    let milliseconds = total_ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, milliseconds)
}

/// Parse an SRT timestamp (HH:MM:SS,mmm) back to a Duration
pub fn parse_timestamp(timestamp: &str) -> Result<Duration> {
    let invalid = || ConvertError::Parse(format!("invalid SRT timestamp: {timestamp}"));

    let (hms, millis) = timestamp.split_once(',').ok_or_else(invalid)?;

    let hms_parts: Vec<&str> = hms.split(':').collect();
    if hms_parts.len() != 3 {
        return Err(invalid());
    }

    let hours: u64 = hms_parts[0].parse().map_err(|_| invalid())?;
    let minutes: u64 = hms_parts[1].parse().map_err(|_| invalid())?;
    let seconds: u64 = hms_parts[2].parse().map_err(|_| invalid())?;
    let milliseconds: u64 = millis.parse().map_err(|_| invalid())?;

    let total_seconds = hours * 3600 + minutes * 60 + seconds;
    Ok(Duration::from_millis(total_seconds * 1000 + milliseconds))
}

/// Clean text for use as a cue body
///
/// Trims, and collapses runs of whitespace (including newlines, which the
/// SRT format reserves as cue separators) to single spaces.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
