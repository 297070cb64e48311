//! HTTP server implementation for the Visualizer

use super::handler::{
    document_handler, graph_handler, journey_handler, status_handler, tree_handler, SharedAtlas,
};
use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use rust_embed::RustEmbed;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::ServerConfig;

#[derive(RustEmbed)]
#[folder = "src/http/static/"]
struct Assets;

async fn static_handler() -> impl IntoResponse {
    match Assets::get("index.html") {
        Some(file) => Html(String::from_utf8_lossy(file.data.as_ref()).into_owned()).into_response(),
        None => (axum::http::StatusCode::NOT_FOUND, "shell page missing").into_response(),
    }
}

/// Build the API router; exposed separately so tests can drive it directly
pub fn router(atlas: SharedAtlas) -> Router {
    Router::new()
        .route("/", get(static_handler))
        .route("/api/status", get(status_handler))
        .route("/api/graph", get(graph_handler))
        .route("/api/tree", get(tree_handler))
        .route("/api/journey", get(journey_handler))
        .route("/api/documents/:id", get(document_handler))
        .layer(CorsLayer::permissive())
        .with_state(atlas)
}

/// HTTP server managing the Visualizer API and static assets
pub struct HttpServer {
    atlas: SharedAtlas,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(atlas: SharedAtlas, config: ServerConfig) -> Self {
        Self { atlas, config }
    }

    /// Start the HTTP server
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(self.atlas.clone());

        let addr = format!("{}:{}", self.config.address, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Visualizer available at http://{}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
