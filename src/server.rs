//! HTTP transport for the MCP tools
//!
//! `POST /mcp` carries JSON-RPC requests. Everything under `/mcp` sits behind
//! the bearer gate; `/health` does not.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::auth::{BearerGate, PROTECTED_PREFIX};
use crate::config::ServerConfig;
use crate::error::{Result, WellnessError};
use crate::mcp::{McpHandler, McpRequest, McpResponse, WellnessHandler};
use crate::storage::Storage;

/// Header carrying the per-end-user identity
pub const CALLER_ID_HEADER: &str = "puch-user-id";

/// Shared state for request handlers
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<WellnessHandler>,
    pub gate: Arc<BearerGate>,
}

impl AppState {
    pub fn new(handler: WellnessHandler, gate: BearerGate) -> Self {
        Self {
            handler: Arc::new(handler),
            gate: Arc::new(gate),
        }
    }
}

/// HTTP server
pub struct WellnessServer {
    state: AppState,
    addr: SocketAddr,
}

impl WellnessServer {
    /// Wire a server from validated config and an opened store
    pub fn new(config: &ServerConfig, storage: Storage) -> Self {
        let handler = WellnessHandler::new(storage, config.identity.clone());
        let gate = BearerGate::new(&config.auth_token);
        Self {
            state: AppState::new(handler, gate),
            addr: config.addr,
        }
    }

    /// Build the router
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route(PROTECTED_PREFIX, post(mcp_post).get(mcp_get))
            .route("/mcp/", post(mcp_post).get(mcp_get))
            .route("/health", get(health_handler))
            .layer(middleware::from_fn_with_state(state.clone(), require_bearer))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Consume the server into its router (for in-process testing)
    pub fn into_router(self) -> Router {
        Self::router(self.state)
    }

    /// Start the server
    pub async fn start(self) -> std::io::Result<()> {
        let addr = self.addr;
        let app = self.into_router();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Wellness MCP server listening on {}", listener.local_addr()?);
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Reject protected requests without the configured bearer token
async fn require_bearer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match state.gate.check(&path, authorization) {
        Ok(()) => next.run(req).await,
        Err(e) => {
            tracing::warn!(path = %path, "Rejected request: {}", e);
            e.into_response()
        }
    }
}

/// Health check endpoint
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn mcp_get() -> Response {
    StatusCode::METHOD_NOT_ALLOWED.into_response()
}

/// JSON-RPC entry point
async fn mcp_post(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let request: McpRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            let response = McpResponse::error(None, -32700, format!("Parse error: {}", e));
            return (StatusCode::BAD_REQUEST, Json(response)).into_response();
        }
    };

    let caller = caller_identity(&headers);
    let id = request.id.clone();
    let notification = request.is_notification();

    match dispatch(state.handler.clone(), request, caller).await {
        Ok(_) if notification => StatusCode::ACCEPTED.into_response(),
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            if !e.is_client_error() {
                tracing::error!("Request failed: {}", e);
            }
            let status = StatusCode::from_u16(e.status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(McpResponse::from_error(id, &e))).into_response()
        }
    }
}

/// Run a request on the blocking pool; store calls hold the connection lock
async fn dispatch(
    handler: Arc<WellnessHandler>,
    request: McpRequest,
    caller: Option<String>,
) -> Result<McpResponse> {
    tokio::task::spawn_blocking(move || handler.handle_request(request, caller.as_deref()))
        .await
        .map_err(|e| WellnessError::Internal(format!("handler task failed: {}", e)))?
}

fn caller_identity(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CALLER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl IntoResponse for WellnessError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self {
            WellnessError::Unauthorized => {
                (status, Json(json!({ "detail": self.to_string() }))).into_response()
            }
            _ => (status, Json(McpResponse::from_error(None, &self))).into_response(),
        }
    }
}
