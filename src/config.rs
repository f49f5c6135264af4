use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the diarized-SRT converter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Conversion policy settings
    pub conversion: ConversionConfig,

    /// Output and storage settings
    pub output: OutputConfig,

    /// Web UI server settings
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// What to do when diarized entries are absent or empty
    pub missing_entries: MissingEntriesPolicy,

    /// Cue length in seconds for the full-transcript fallback
    pub fallback_duration_seconds: f64,

    /// What to do with a segment that fails timestamp validation
    pub on_invalid_segment: InvalidSegmentPolicy,
}

/// Policy for responses without diarized entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingEntriesPolicy {
    /// Fail the conversion
    Error,
    /// Emit the top-level transcript as a single untimed cue
    FullTranscript,
}

/// Policy for segments with invalid timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidSegmentPolicy {
    /// Abort the whole conversion; no partial output
    Abort,
    /// Drop the offending segment and continue
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for derived output paths
    pub base_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port for the web UI
    pub port: u16,
}

impl Config {
    /// Load configuration from file, falling back to environment overrides
    pub fn load() -> Result<Self> {
        let config_paths = [
            "diarized-srt.toml",
            "config/diarized-srt.toml",
            "~/.config/diarized-srt/config.toml",
            "/etc/diarized-srt/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Build configuration from defaults plus environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(output_dir) = std::env::var("DIARIZED_SRT_OUTPUT_DIR") {
            config.output.base_dir = PathBuf::from(output_dir);
        }

        if let Ok(log_level) = std::env::var("DIARIZED_SRT_LOG_LEVEL") {
            config.output.log_level = log_level;
        }

        if let Ok(duration) = std::env::var("DIARIZED_SRT_FALLBACK_DURATION") {
            config.conversion.fallback_duration_seconds = duration.parse().unwrap_or(5.0);
        }

        if let Ok(port) = std::env::var("DIARIZED_SRT_PORT") {
            config.server.port = port.parse().unwrap_or(8080);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.conversion.fallback_duration_seconds.is_finite()
            || self.conversion.fallback_duration_seconds <= 0.0
        {
            return Err(anyhow!("fallback_duration_seconds must be a positive number"));
        }

        if self.server.port == 0 {
            return Err(anyhow!("server port must be non-zero"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            conversion: ConversionConfig {
                missing_entries: MissingEntriesPolicy::Error,
                fallback_duration_seconds: 5.0,
                on_invalid_segment: InvalidSegmentPolicy::Abort,
            },
            output: OutputConfig {
                base_dir: PathBuf::from("./output"),
                log_level: "info".to_string(),
            },
            server: ServerConfig { port: 8080 },
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.config.output.base_dir = dir;
        self
    }

    pub fn with_missing_entries_policy(mut self, policy: MissingEntriesPolicy) -> Self {
        self.config.conversion.missing_entries = policy;
        self
    }

    pub fn with_fallback_duration(mut self, seconds: f64) -> Self {
        self.config.conversion.fallback_duration_seconds = seconds;
        self
    }

    pub fn with_invalid_segment_policy(mut self, policy: InvalidSegmentPolicy) -> Self {
        self.config.conversion.on_invalid_segment = policy;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
