//! Visualizer API tests, driving the router directly with oneshot requests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use charkha::corpus::{Corpus, CorpusFixtures, Document};
use charkha::http::router;
use charkha::journey::{Gazetteer, GeoPoint};
use charkha::Atlas;
use http_body_util::BodyExt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;

fn app() -> axum::Router {
    let corpus = Corpus::from_documents(vec![
        Document::new(1, "Arrival in Bombay", "1915-01-09", Some("Bombay"), ["Return"], "full text"),
        Document::new(2, "Khadi appeal", "1921-08", Some("Ahmedabad"), ["Khadi"], "full text"),
        Document::new(3, "Quit India", "1942-08-08", Some("Bombay"), ["Civil disobedience"], "full text"),
    ]);
    let mut gazetteer = Gazetteer::default();
    gazetteer.insert("Bombay", GeoPoint { lat: 18.94, lon: 72.83 });
    gazetteer.insert("Ahmedabad", GeoPoint { lat: 23.03, lon: 72.58 });

    let atlas = Atlas::from_fixtures(CorpusFixtures {
        corpus,
        graph: None,
        taxonomy: None,
        gazetteer,
    });
    router(Arc::new(RwLock::new(atlas)))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_status_endpoint() {
    let (status, json) = get_json(app(), "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["corpus"]["documents"], 3);
    assert_eq!(json["journey"]["stops"], 2);
}

#[tokio::test]
async fn test_graph_endpoint_unfiltered() {
    let (status, json) = get_json(app(), "/api/graph").await;
    assert_eq!(status, StatusCode::OK);
    // 3 documents + 3 themes, one position per node
    assert_eq!(json["nodes"].as_array().unwrap().len(), 6);
    assert_eq!(json["positions"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_graph_endpoint_year_filter_never_orphans_edges() {
    let (status, json) = get_json(app(), "/api/graph?from=1920&to=1930").await;
    assert_eq!(status, StatusCode::OK);

    let nodes = json["nodes"].as_array().unwrap();
    let ids: Vec<&serde_json::Value> = nodes.iter().map(|n| &n["id"]).collect();
    for edge in json["edges"].as_array().unwrap() {
        assert!(ids.contains(&&edge["source"]));
        assert!(ids.contains(&&edge["target"]));
    }
    // only the Khadi appeal and its theme survive
    assert_eq!(nodes.len(), 2);
}

#[tokio::test]
async fn test_tree_endpoint_depth_cut() {
    let (status, json) = get_json(app(), "/api/tree?depth=1").await;
    assert_eq!(status, StatusCode::OK);

    let root = &json["tree"];
    assert_eq!(root["kind"], "root");
    // depth 1: categories visible but collapsed
    let categories = root["children"].as_array().unwrap();
    assert!(!categories.is_empty());
    for category in categories {
        assert_eq!(category["collapsed"], true);
        assert!(category["children"].as_array().unwrap().is_empty());
    }
    assert_eq!(json["positions"].as_array().unwrap().len(), 1 + categories.len());
}

#[tokio::test]
async fn test_journey_endpoint_with_theme() {
    let (status, json) = get_json(app(), "/api/journey?theme=Khadi").await;
    assert_eq!(status, StatusCode::OK);
    let stops = json["stops"].as_array().unwrap();
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0]["location"], "Ahmedabad");
    assert_eq!(json["points"], 1);
}

#[tokio::test]
async fn test_document_endpoint() {
    let (status, json) = get_json(app(), "/api/documents/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Khadi appeal");
    assert_eq!(json["rawDate"], "1921-08");

    let (status, json) = get_json(app(), "/api/documents/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_malformed_query_params_get_json_error() {
    for uri in ["/api/graph?from=abc", "/api/graph?to=1.5", "/api/tree?depth=-1"] {
        let (status, json) = get_json(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
        // error body uses the same JSON shape as the 404 path
        let message = json["error"].as_str().unwrap_or_else(|| panic!("no error field for {}", uri));
        assert!(!message.is_empty());
    }
}

#[tokio::test]
async fn test_shell_page_served() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("Charkha"));
}
