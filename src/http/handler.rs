//! HTTP handlers for the Visualizer API

use crate::atlas::Atlas;
use crate::corpus::DocId;
use crate::layout::{RadialLayout, TimelineLayout};
use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::request::Parts,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared server state
pub type SharedAtlas = Arc<RwLock<Atlas>>;

/// Query extractor whose rejection matches the API error shape
///
/// Axum's stock `Query` rejects malformed parameters with a plain-text
/// body; the API contract is 400 with `{ "error": ... }` everywhere.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": rejection.body_text() })),
            )),
        }
    }
}

/// Query parameters for the graph view
#[derive(Deserialize)]
pub struct GraphParams {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Handler for the knowledge graph view
///
/// With `from`/`to` the graph is year-filtered; a missing bound defaults to
/// the corpus edge of the range. Timeline seed positions ride along.
pub async fn graph_handler(
    State(atlas): State<SharedAtlas>,
    ApiQuery(params): ApiQuery<GraphParams>,
) -> impl IntoResponse {
    let atlas = atlas.read().await;

    let graph = match (params.from, params.to) {
        (None, None) => atlas.graph.clone(),
        (from, to) => {
            let (lo, hi) = atlas.corpus.year_range().unwrap_or((0, 0));
            atlas.graph.filter_years(from.unwrap_or(lo), to.unwrap_or(hi))
        }
    };

    let layout = TimelineLayout::new(params.width.unwrap_or(1200.0), params.height.unwrap_or(600.0));
    let positions = layout.place(&graph);

    Json(json!({
        "nodes": graph.nodes().collect::<Vec<_>>(),
        "edges": graph.edges(),
        "positions": positions,
    }))
}

/// Query parameters for the hierarchy view
#[derive(Deserialize)]
pub struct TreeParams {
    /// Levels below the root left expanded; deeper nodes come back collapsed
    pub depth: Option<usize>,
    pub ring: Option<f64>,
}

/// Handler for the radial hierarchy view
pub async fn tree_handler(
    State(atlas): State<SharedAtlas>,
    ApiQuery(params): ApiQuery<TreeParams>,
) -> impl IntoResponse {
    let atlas = atlas.read().await;

    let mut tree = atlas.tree.clone();
    if let Some(depth) = params.depth {
        tree.collapse_to_depth(depth);
    }

    let layout = RadialLayout::new(params.ring.unwrap_or(120.0));
    let positions = layout.place(&tree);

    Json(json!({
        "tree": tree.to_view(),
        "positions": positions,
    }))
}

/// Query parameters for the journey view
#[derive(Deserialize)]
pub struct JourneyParams {
    pub theme: Option<String>,
}

/// Handler for the map journey view
pub async fn journey_handler(
    State(atlas): State<SharedAtlas>,
    ApiQuery(params): ApiQuery<JourneyParams>,
) -> impl IntoResponse {
    let atlas = atlas.read().await;

    let journey = match params.theme.as_deref() {
        Some(theme) => atlas.journey.filter_theme(theme),
        None => atlas.journey.clone(),
    };

    Json(json!({
        "points": journey.point_count(),
        "stops": journey.stops,
        "skipped": journey.skipped,
    }))
}

/// Handler for a single document
pub async fn document_handler(
    State(atlas): State<SharedAtlas>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let atlas = atlas.read().await;
    match atlas.corpus.get(DocId::new(id)) {
        Some(doc) => Json(json!(doc)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("no document with id {}", id) })),
        )
            .into_response(),
    }
}

/// Handler for system status
pub async fn status_handler(State(atlas): State<SharedAtlas>) -> impl IntoResponse {
    let atlas = atlas.read().await;
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
        "corpus": {
            "documents": atlas.corpus.len(),
            "locations": atlas.corpus.locations().count(),
        },
        "graph": {
            "nodes": atlas.graph.node_count(),
            "edges": atlas.graph.edge_count(),
        },
        "tree": {
            "documents": atlas.tree.doc_count,
            "visible": atlas.tree.visible_len(),
        },
        "journey": {
            "stops": atlas.journey.stops.len(),
            "points": atlas.journey.point_count(),
            "skipped": atlas.journey.skipped,
        },
    }))
}
