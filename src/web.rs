// src/web.rs

//! The browser viewer: a small JSON API over the bundle plus the embedded
//! single-page UI.
//!
//! Every request builds its own `ViewSession` with an inline search backend,
//! so the server keeps no per-client state. File access, rendering and search
//! run on tokio's blocking pool.

use crate::config::ViewerConfig;
use crate::coordinator::{ViewSession, ViewSnapshot};
use crate::core_types::{FilePayload, Window};
use crate::errors::Error;
use crate::filter::LevelFilter;
use crate::format::lines_to_html;
use crate::search::{InlineBackend, SearchOptions, SearchSnapshot};
use crate::source::{ContentSource, FileNode, FsSource};
use axum::extract::Query;
use axum::{
    extract::{Json, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

struct AppState {
    config: ViewerConfig,
    source: FsSource,
}

impl AppState {
    fn session(&self) -> ViewSession<FsSource> {
        ViewSession::with_backend(
            self.source.clone(),
            self.config.session_options(),
            Box::new(InlineBackend::new()),
        )
    }

    /// Fetches `path` the way the viewer opens it: whole or first window, then
    /// the window holding `offset` for paginated files.
    fn open_payload(&self, path: &str, offset: usize) -> crate::errors::Result<FilePayload> {
        let payload = self.source.fetch(path, None)?;
        if offset == 0 || !payload.is_windowed() {
            return Ok(payload);
        }
        self.source.fetch(
            path,
            Some(Window {
                offset,
                limit: self.config.page_size,
            }),
        )
    }
}

// --- Request / Response Structs ---

#[derive(Deserialize, Debug)]
pub struct FileQuery {
    pub path: String,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Deserialize, Debug)]
pub struct ViewQuery {
    pub path: String,
    #[serde(default)]
    pub offset: usize,
    pub level: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct SearchRequest {
    pub path: String,
    pub query: String,
}

#[derive(Serialize, Debug)]
pub struct ViewResponse {
    pub view: ViewSnapshot,
    pub level: LevelFilter,
    /// Lines left after the level filter.
    pub shown_lines: usize,
    pub html: String,
}

#[derive(Serialize, Debug)]
pub struct SearchResponse {
    pub search: Option<SearchSnapshot>,
    pub html: String,
}

#[derive(Serialize, Debug)]
pub struct ConfigResponse {
    pub page_size: usize,
    pub pagination_threshold: usize,
    pub max_file_size: u64,
    pub search: SearchOptions,
    pub debounce_ms: u64,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

// --- Errors ---

#[derive(Debug)]
enum ApiError {
    Viewer(Error),
    BadRequest(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError::Viewer(e)
    }
}

fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::InvalidPath(_) | Error::NotAFile(_) | Error::Config(_) => StatusCode::BAD_REQUEST,
        Error::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        Error::BinaryContent(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Error::SearchDisabled | Error::NoFileOpen => StatusCode::CONFLICT,
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        Error::ContentUnavailable { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Viewer(e) => (status_for(&e), e.to_string()),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        if status.is_server_error() {
            tracing::error!("{}", message);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, message);
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

async fn blocking<T, F>(task: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
}

// --- Server Startup ---

/// Builds the router for the bundle described by `config`.
///
/// # Errors
/// Returns `Error::Io` if the bundle root cannot be resolved.
pub fn create_router(config: ViewerConfig) -> crate::errors::Result<Router> {
    let source = config.fs_source()?;
    let state = Arc::new(AppState { config, source });

    Ok(Router::new()
        .route("/api/tree", get(tree_handler))
        .route("/api/file", get(file_handler))
        .route("/api/view", get(view_handler))
        .route("/api/search", post(search_handler))
        .route("/api/config", get(config_handler))
        .fallback(static_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

pub async fn start_server(config: ViewerConfig, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let root = config.root.display().to_string();
    let app = create_router(config)?;

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let url = format!("http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("logview is serving {} at {}", root, url);
    tracing::info!("Listening on {}", addr);

    if open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!("Could not open a browser: {}", e);
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

// --- Handlers ---

async fn static_handler(uri: Uri) -> impl IntoResponse {
    let mut path = uri.path().trim_start_matches('/').to_string();
    if path.is_empty() {
        path = "index.html".to_string();
    }
    match Assets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}

async fn config_handler(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    let config = &state.config;
    Json(ConfigResponse {
        page_size: config.page_size,
        pagination_threshold: config.pagination_threshold,
        max_file_size: config.max_file_size,
        search: config.search,
        debounce_ms: config.debounce.as_millis() as u64,
    })
}

async fn tree_handler(State(state): State<Arc<AppState>>) -> Result<Json<FileNode>, ApiError> {
    let tree = blocking(move || Ok(state.source.tree()?)).await?;
    Ok(Json(tree))
}

async fn file_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FileQuery>,
) -> Result<Json<FilePayload>, ApiError> {
    let window = match (query.offset, query.limit) {
        (None, None) => None,
        (offset, limit) => Some(Window {
            offset: offset.unwrap_or(0),
            limit: limit.unwrap_or(0),
        }),
    };
    let payload = blocking(move || Ok(state.source.fetch(&query.path, window)?)).await?;
    Ok(Json(payload))
}

async fn view_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ViewResponse>, ApiError> {
    let level = match query.level.as_deref() {
        Some(level) => level
            .parse::<LevelFilter>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => LevelFilter::All,
    };

    let response = blocking(move || {
        let payload = state.open_payload(&query.path, query.offset)?;
        let mut session = state.session();
        session.load_payload(payload)?;

        let view = session.snapshot();
        let (level, shown_lines, html) = match session.formatted() {
            Some(formatted) if formatted.is_log_like && level != LevelFilter::All => {
                let lines: Vec<_> = session.filter(level).into_iter().cloned().collect();
                (level, lines.len(), lines_to_html(&lines, formatted.class))
            }
            _ => (LevelFilter::All, view.line_count, session.to_html()),
        };
        Ok(ViewResponse {
            view,
            level,
            shown_lines,
            html,
        })
    })
    .await?;
    Ok(Json(response))
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let response = blocking(move || {
        let payload = state.open_payload(&request.path, 0)?;
        let mut session = state.session();
        session.load_payload(payload)?;
        session.search_now(&request.query)?;
        session.poll_search();
        Ok(SearchResponse {
            search: session.search_state().map(|s| s.snapshot()),
            html: session.to_html(),
        })
    })
    .await?;
    Ok(Json(response))
}
