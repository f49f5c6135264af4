//! HTTP server implementation for the web UI

use anyhow::Result;
use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::{handlers, models::ApiResponse};
use crate::config::Config;
use crate::convert::Converter;
use crate::ConvertError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub converter: Arc<Converter>,
}

/// Configure and start the HTTP server
pub async fn start_http_server(config: Arc<Config>, port: u16) -> Result<()> {
    let app_state = AppState {
        converter: Arc::new(Converter::new((*config).clone())),
    };

    // Configure CORS to allow browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .route("/", get(serve_ui))
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        .route("/api/convert", post(convert_handler))
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("🌐 Web UI listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(handlers::health_check().await))
}

/// Conversion handler
///
/// Bad input data maps to 400 so the UI can tell it apart from a server
/// failure.
async fn convert_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    match handlers::convert(&state.converter, payload).await {
        Ok(outcome) => (StatusCode::OK, Json(ApiResponse::success(outcome))).into_response(),
        Err(e) => {
            let status = match e {
                ConvertError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            };
            (status, Json(ApiResponse::<()>::error(e.to_string()))).into_response()
        }
    }
}

/// Serve the single-page UI
async fn serve_ui() -> impl IntoResponse {
    let html = r#"
<!DOCTYPE html>
<html>
<head>
    <title>Diarized SRT Converter</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; max-width: 900px; }
        textarea { width: 100%; height: 200px; font-family: monospace; }
        table { border-collapse: collapse; width: 100%; margin-top: 20px; }
        th, td { border: 1px solid #ccc; padding: 6px 10px; text-align: left; }
        th { background: #f5f5f5; }
        .error { color: #b00020; margin-top: 10px; }
        button { margin-top: 10px; padding: 8px 16px; }
    </style>
</head>
<body>
    <h1>Diarized SRT Converter</h1>
    <p>Paste a diarized speech-to-text API response (JSON) and convert it to
       a speaker-tagged SRT subtitle file.</p>

    <textarea id="json-input" placeholder='{"diarized_transcript": {"entries": [...]}}'></textarea>
    <br>
    <button id="convert-btn">Convert</button>
    <button id="download-btn" disabled>Download SRT</button>
    <div id="error" class="error"></div>
    <div id="preview"></div>

    <script>
        let srtText = '';
        let requestId = 'transcript';

        document.getElementById('convert-btn').addEventListener('click', async () => {
            const errorEl = document.getElementById('error');
            const previewEl = document.getElementById('preview');
            errorEl.textContent = '';
            previewEl.innerHTML = '';
            document.getElementById('download-btn').disabled = true;

            let payload;
            try {
                payload = JSON.parse(document.getElementById('json-input').value);
            } catch (e) {
                errorEl.textContent = 'Not valid JSON: ' + e.message;
                return;
            }

            const res = await fetch('/api/convert', {
                method: 'POST',
                headers: {'Content-Type': 'application/json'},
                body: JSON.stringify(payload),
            });
            const body = await res.json();
            if (!body.success) {
                errorEl.textContent = body.error;
                return;
            }

            srtText = body.data.srt;
            requestId = body.data.request_id || 'transcript';
            document.getElementById('download-btn').disabled = false;

            let rows = body.data.cues.map(c =>
                `<tr><td>${c.index}</td><td>${c.start}</td><td>${c.end}</td><td>${escapeHtml(c.text)}</td></tr>`
            ).join('');
            previewEl.innerHTML =
                `<p>${body.data.cue_count} cues</p>` +
                `<table><tr><th>#</th><th>Start</th><th>End</th><th>Text</th></tr>${rows}</table>`;
        });

        document.getElementById('download-btn').addEventListener('click', () => {
            const blob = new Blob([srtText], {type: 'text/plain;charset=utf-8'});
            const a = document.createElement('a');
            a.href = URL.createObjectURL(blob);
            a.download = requestId + '.srt';
            a.click();
            URL.revokeObjectURL(a.href);
        });

        function escapeHtml(s) {
            return s.replace(/&/g, '&amp;').replace(/</g, '&lt;').replace(/>/g, '&gt;');
        }
    </script>
</body>
</html>
"#;

    (StatusCode::OK, [("content-type", "text/html")], html)
}
