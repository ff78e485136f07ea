//! HTTP search service.
//!
//! Loads the converted dataset once at startup and serves it read-only.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/search?q=<term>` | Up to `max_results` records whose company name contains `q` |
//! | `GET`  | `/health` | Health check (version and record count) |
//! | `GET`  | `/` | Static entry page (`index.html`), when static serving is enabled |
//!
//! With `[server].serve_static = true` every other path is resolved against
//! `static_dir`. With it disabled, unknown paths get a JSON `404`:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "no route for /foo" } }
//! ```
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so a browser front-end
//! served from elsewhere can call the search endpoint.

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::{Config, ServerConfig};
use crate::dataset::Dataset;
use crate::search::search;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// The loaded records (wrapped in `Arc` for cheap cloning across handlers).
    dataset: Arc<Dataset>,
    max_results: usize,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, max_results: usize) -> Self {
        Self {
            dataset,
            max_results,
        }
    }
}

/// Loads the dataset and serves it until the process is terminated.
///
/// A missing or malformed data file is returned as an error before the
/// listener is bound, so the service never starts without data.
pub async fn run_server(config: &Config) -> Result<()> {
    let dataset = Dataset::load(&config.data.json_path)?;
    tracing::info!(
        records = dataset.len(),
        path = %config.data.json_path.display(),
        "loaded dataset"
    );

    let state = AppState::new(Arc::new(dataset), config.search.max_results);
    let app = build_router(state, &config.server);

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!(
        serve_static = config.server.serve_static,
        "Server is running on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the router for `state`.
///
/// Exposed separately from [`run_server`] so tests can bind it to an
/// ephemeral port.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/search", get(handle_search))
        .route("/health", get(handle_health));

    let app = if server.serve_static {
        let index = server.static_dir.join(&server.index_file);
        api.route_service("/", ServeFile::new(index))
            .fallback_service(ServeDir::new(&server.static_dir))
    } else {
        api.fallback(handle_not_found)
    };

    app.layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"not_found"`).
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

async fn handle_not_found(uri: Uri) -> AppError {
    not_found(format!("no route for {}", uri.path()))
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    version: String,
    records: usize,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.dataset.len(),
    })
}

// ============ GET /api/search ============

/// Query string for `GET /api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text term; absent is the same as empty.
    pub q: Option<String>,
}

/// Handler for `GET /api/search`.
///
/// Responds with a JSON array of full records, in dataset order. An empty or
/// missing `q` returns the first `max_results` records.
async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.unwrap_or_default();
    let results = search(&state.dataset, &query, state.max_results);
    tracing::debug!(query = %query, matches = results.len(), "search");

    // Serialized here, while `results` still borrows the dataset.
    Json(results).into_response()
}
