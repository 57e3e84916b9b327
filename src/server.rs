//! The HTTP surface: an axum router mapping site routes onto the content
//! pipeline. Every handler loads a fresh post index from the
//! [`DocumentStore`], so responses always reflect the current directory
//! state and no handler shares derived data with another request.

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::agent;
use crate::config::Config;
use crate::feed;
use crate::markdown;
use crate::page::{self, PageComposer};
use crate::post::DocumentStore;
use crate::sitemap;

/// Application state shared across all handlers. The composer is the
/// only non-trivial member and is immutable after construction.
pub struct AppState {
    pub config: Config,
    pub store: DocumentStore,
    pub composer: PageComposer,
}

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Requested post slug is not in the current index.
    #[error("post not found: {0}")]
    PostNotFound(String),

    /// Template execution failed.
    #[error("composing page: {0}")]
    Compose(#[from] page::Error),

    /// The content root exists but could not be read.
    #[error("reading posts: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::PostNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Compose(_) | ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/blog", get(blog_index))
        .route("/blog/{slug}", get(blog_post))
        .route("/tools", get(tools))
        .route("/about", get(about))
        .route("/health", get(health))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/rss.xml", get(rss_xml))
        .route("/robots.txt", get(robots_txt))
        .route("/llms.txt", get(llms_txt))
        .route("/llms-full.txt", get(llms_full))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the listener and serves until Ctrl-C.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let store = DocumentStore::new(&config.content_dir);
    let composer = PageComposer::new(&config)?;
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    let state = Arc::new(AppState {
        config,
        store,
        composer,
    });

    let app = create_router(state);
    tracing::info!(address = %addr, "starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl-C handler");
    tracing::info!("shutdown signal received, stopping server");
}

async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let posts = state.store.load_posts()?;
    Ok(Html(state.composer.home_page(&posts)?))
}

async fn blog_index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let posts = state.store.load_posts()?;
    Ok(Html(state.composer.listing_page(&posts)?))
}

async fn blog_post(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let posts = state.store.load_posts()?;
    let post = posts
        .iter()
        .find(|post| post.slug == slug)
        .ok_or(ServerError::PostNotFound(slug))?;
    let rendered = markdown::render(&post.content);
    Ok(Html(state.composer.post_page(post, &rendered.html)?))
}

async fn tools(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    Ok(Html(state.composer.tools_page()?))
}

async fn about(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    Ok(Html(state.composer.about_page()?))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn sitemap_xml(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let posts = state.store.load_posts()?;
    Ok(xml_response(sitemap::sitemap_xml(&state.config, &posts)))
}

async fn rss_xml(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ServerError> {
    let posts = state.store.load_posts()?;
    Ok(xml_response(feed::rss_xml(&state.config, &posts)))
}

async fn robots_txt(State(state): State<Arc<AppState>>) -> String {
    agent::robots_txt(&state.config)
}

async fn llms_txt(State(state): State<Arc<AppState>>) -> Result<String, ServerError> {
    let posts = state.store.load_posts()?;
    Ok(agent::agent_summary(&state.config, &posts))
}

async fn llms_full(State(state): State<Arc<AppState>>) -> Result<String, ServerError> {
    let posts = state.store.load_posts()?;
    Ok(agent::agent_full(&state.config, &posts))
}

fn xml_response(body: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/xml")], body)
}
