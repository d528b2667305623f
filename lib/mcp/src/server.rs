//! The stdio and HTTP transports.

use crate::config::ServerConfig;
use crate::handlers::Handlers;
use crate::protocol::{error_codes, JsonRpcRequest, JsonRpcResponse};
use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use lehrplan_client::SparqlClient;
use lehrplan_engine::LehrplanService;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

fn build_handlers(config: ServerConfig) -> Handlers<SparqlClient> {
    let ServerConfig { endpoint, registry } = config;
    let service = LehrplanService::new(SparqlClient::new(endpoint), Arc::new(registry));
    Handlers::new(service)
}

async fn handle_message(
    handlers: &Handlers<SparqlClient>,
    input: &str,
) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(input) {
        Ok(request) => request,
        Err(e) => {
            warn!("failed to parse request: {e}");
            return Some(JsonRpcResponse::error(
                None,
                error_codes::PARSE_ERROR,
                format!("parse error: {e}"),
            ));
        }
    };
    handlers.dispatch(request).await
}

/// Runs the server on stdin/stdout with newline-delimited JSON-RPC messages.
///
/// Logging goes to stderr; stdout carries only protocol messages.
pub async fn serve_stdio(config: ServerConfig) -> anyhow::Result<()> {
    let handlers = build_handlers(config);
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut writer = tokio::io::stdout();
    let mut line = String::new();

    info!("listening on stdio");
    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .context("could not read from stdin")?;
        if bytes_read == 0 {
            info!("stdin closed, shutting down");
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        debug!(message, "received");

        if let Some(response) = handle_message(&handlers, message).await {
            let payload = serde_json::to_string(&response)?;
            writer
                .write_all(payload.as_bytes())
                .await
                .context("could not write to stdout")?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }
    Ok(())
}

/// Runs the server as an HTTP endpoint accepting JSON-RPC bodies via POST.
pub async fn serve_http(config: ServerConfig, bind: &str) -> anyhow::Result<()> {
    let handlers = Arc::new(build_handlers(config));
    let app = Router::new()
        .route("/", post(handle_post))
        .with_state(handlers);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("could not bind to {bind}"))?;
    info!("listening on http://{bind}");
    Ok(axum::serve(listener, app).await?)
}

async fn handle_post(
    State(handlers): State<Arc<Handlers<SparqlClient>>>,
    body: String,
) -> Response {
    match handle_message(&handlers, &body).await {
        Some(response) => Json(response).into_response(),
        // Notifications are accepted but never answered.
        None => StatusCode::ACCEPTED.into_response(),
    }
}
