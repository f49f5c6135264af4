use anyhow::{anyhow, Context, Result};
use clap::{Arg, Command};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::{info, warn};

use diarized_srt::config::{Config, InvalidSegmentPolicy, MissingEntriesPolicy};
use diarized_srt::convert::Converter;
use diarized_srt::transcript::SttResponse;

const PREVIEW_LINES: usize = 15;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("diarized_srt=info,warn")
        .init();

    let matches = Command::new("Diarized SRT Converter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Create an SRT subtitle file from a diarized speech-to-text API response")
        .arg(
            Arg::new("json-file")
                .short('f')
                .long("json-file")
                .value_name("PATH")
                .help("Path to a JSON file containing the API response"),
        )
        .arg(
            Arg::new("json-string")
                .short('j')
                .long("json-string")
                .value_name("JSON")
                .help("API response JSON passed inline"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Output path for the SRT file (default: derived from the request id)"),
        )
        .arg(
            Arg::new("fallback-full-transcript")
                .long("fallback-full-transcript")
                .help("When no diarized entries exist, emit the flat transcript as one cue")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("skip-invalid")
                .long("skip-invalid")
                .help("Skip segments with invalid timestamps instead of aborting")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("verbose") {
        info!("Verbose logging enabled");
    }

    // Load configuration
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    if matches.get_flag("fallback-full-transcript") {
        config.conversion.missing_entries = MissingEntriesPolicy::FullTranscript;
    }
    if matches.get_flag("skip-invalid") {
        config.conversion.on_invalid_segment = InvalidSegmentPolicy::Skip;
    }
    config.validate()?;

    let output_path = matches.get_one::<String>("output").map(PathBuf::from);

    // Acquire the response JSON
    let json_data = if let Some(path) = matches.get_one::<String>("json-file") {
        info!("📄 Reading API response from file: {}", path);
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path))?
    } else if let Some(json) = matches.get_one::<String>("json-string") {
        info!("📄 Processing API response from command line argument");
        json.clone()
    } else {
        if std::io::stdin().is_terminal() {
            println!("Paste the API response JSON below (press Ctrl+D when done):");
        } else {
            info!("📄 Reading API response from standard input...");
        }
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let json_data = json_data.trim();
    if json_data.is_empty() {
        return Err(anyhow!("no JSON data provided"));
    }

    let response = SttResponse::from_json_str(json_data)?;
    let converter = Converter::new(config);
    let srt_path = converter
        .convert_to_file(&response, output_path.as_deref())
        .await?;

    println!("✅ SRT file created at: {}", srt_path.display());
    print_preview(&srt_path, response.entries().len()).await?;

    Ok(())
}

/// Show the head of the generated file, like the content preview a user
/// would get from opening it
async fn print_preview(srt_path: &std::path::Path, entry_count: usize) -> Result<()> {
    let content = tokio::fs::read_to_string(srt_path).await?;
    let lines: Vec<&str> = content.lines().collect();

    println!("\nSRT file content preview:");
    println!("{}", "-".repeat(50));
    for line in lines.iter().take(PREVIEW_LINES) {
        println!("{}", line);
    }
    if lines.len() > PREVIEW_LINES {
        println!("...");
        println!("Total entries: {}", entry_count);
    }

    Ok(())
}
