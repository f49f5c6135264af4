use anyhow::Result;
use clap::{Arg, Command};
use std::sync::Arc;
use tracing::{info, warn};

use diarized_srt::api::ApiServer;
use diarized_srt::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("diarized_srt=info,tower_http=info,warn")
        .init();

    let matches = Command::new("Diarized SRT Web UI")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browser upload/preview/download surface for the SRT converter")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to listen on (default: from config)"),
        )
        .get_matches();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    config.validate()?;

    let port = match matches.get_one::<String>("port") {
        Some(p) => p.parse()?,
        None => config.server.port,
    };

    info!("🚀 Diarized SRT web UI starting...");
    ApiServer::new(Arc::new(config), port).start().await
}
