//! Web UI module for the diarized-SRT converter
//!
//! Provides the browser upload/preview/download surface around the
//! conversion routine.

use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::Config;

pub mod handlers;
pub mod models;
pub mod server;

/// HTTP server wrapping the converter
#[derive(Debug)]
pub struct ApiServer {
    config: Arc<Config>,
    port: u16,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: Arc<Config>, port: u16) -> Self {
        Self { config, port }
    }

    /// Start the API server in the background
    pub fn start_background(self) -> JoinHandle<Result<()>> {
        tokio::spawn(async move { self.start().await })
    }

    /// Start the API server
    pub async fn start(self) -> Result<()> {
        info!("🚀 Starting web UI server on port {}", self.port);

        server::start_http_server(self.config, self.port).await
    }
}
