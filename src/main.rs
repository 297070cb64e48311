use anyhow::Context;
use charkha::corpus::CorpusLoader;
use charkha::{Atlas, HttpServer, ServerConfig};
use std::sync::Arc;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let mut config = ServerConfig::from_env();
    if let Some(dir) = std::env::args().nth(1) {
        config.data_dir = dir.into();
    }

    println!("Charkha Corpus Explorer v{}", charkha::version());
    println!("==========================================");
    println!();

    let fixtures = CorpusLoader::load_dir(&config.data_dir)
        .with_context(|| format!("loading fixtures from {}", config.data_dir.display()))?;
    let atlas = Atlas::from_fixtures(fixtures);

    println!("Corpus loaded:");
    println!("  Documents: {}", atlas.corpus.len());
    println!("  Graph:     {} nodes, {} edges", atlas.graph.node_count(), atlas.graph.edge_count());
    println!("  Tree:      {} documents across {} categories", atlas.tree.doc_count, atlas.tree.children.len());
    println!("  Journey:   {} stops, {} points", atlas.journey.stops.len(), atlas.journey.point_count());
    println!();
    println!("Visualizer on http://{}:{} — Ctrl+C to stop.", config.address, config.port);

    let atlas = Arc::new(RwLock::new(atlas));
    let server = HttpServer::new(atlas, config);
    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))?;

    Ok(())
}
