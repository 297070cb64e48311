//! Charkha CLI — terminal explorer for the corpus views
//!
//! Loads the fixture directory directly (no server round-trip) and prints
//! the graph, tree, and journey views as tables, JSON, or CSV.

use charkha::corpus::{CorpusLoader, DocId};
use charkha::Atlas;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "charkha", version, about = "Charkha corpus explorer CLI")]
struct Cli {
    /// Fixture directory
    #[arg(long, default_value = "./data", global = true, env = "CHARKHA_DATA")]
    data: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Corpus and view statistics
    Stats,
    /// Knowledge graph nodes, optionally year-filtered
    Graph {
        /// Keep documents from this year on
        #[arg(long)]
        from: Option<i32>,

        /// Keep documents up to this year
        #[arg(long)]
        to: Option<i32>,

        /// Rows to print
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// The category/theme hierarchy
    Tree {
        /// Levels below the root to keep expanded
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Journey stops in chronological order
    Journey {
        /// Restrict to documents carrying a theme
        #[arg(long)]
        theme: Option<String>,
    },
    /// Theme cloud at one location
    Themes {
        /// Location name as it appears in the fixtures
        #[arg(long)]
        location: String,
    },
    /// Show a single document
    Doc {
        /// Document id
        id: u64,

        /// Print the full text
        #[arg(long)]
        full: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let atlas = Atlas::from_fixtures(CorpusLoader::load_dir(&cli.data)?);
        match cli.command {
            Commands::Stats => run_stats(&atlas, &cli.format),
            Commands::Graph { from, to, limit } => run_graph(&atlas, from, to, limit, &cli.format),
            Commands::Tree { depth } => run_tree(&atlas, depth, &cli.format),
            Commands::Journey { theme } => run_journey(&atlas, theme.as_deref(), &cli.format),
            Commands::Themes { location } => run_themes(&atlas, &location, &cli.format),
            Commands::Doc { id, full } => run_doc(&atlas, id, full, &cli.format),
        }
    })();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_stats(atlas: &Atlas, format: &OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "documents": atlas.corpus.len(),
                    "locations": atlas.corpus.locations().count(),
                    "graphNodes": atlas.graph.node_count(),
                    "graphEdges": atlas.graph.edge_count(),
                    "journeyStops": atlas.journey.stops.len(),
                    "journeySkipped": atlas.journey.skipped,
                }))?
            );
        }
        _ => {
            println!("Documents:     {}", atlas.corpus.len());
            println!("Locations:     {}", atlas.corpus.locations().count());
            println!("Graph:         {} nodes, {} edges", atlas.graph.node_count(), atlas.graph.edge_count());
            println!("Tree:          {} documents", atlas.tree.doc_count);
            println!("Journey:       {} stops, {} points", atlas.journey.stops.len(), atlas.journey.point_count());
            if atlas.journey.skipped > 0 {
                println!("Ungeocodable:  {}", atlas.journey.skipped);
            }
        }
    }
    Ok(())
}

fn run_graph(
    atlas: &Atlas,
    from: Option<i32>,
    to: Option<i32>,
    limit: usize,
    format: &OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let graph = match (from, to) {
        (None, None) => atlas.graph.clone(),
        (from, to) => {
            let (lo, hi) = atlas.corpus.year_range().unwrap_or((0, 0));
            atlas.graph.filter_years(from.unwrap_or(lo), to.unwrap_or(hi))
        }
    };

    if let OutputFormat::Json = format {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "nodes": graph.nodes().collect::<Vec<_>>(),
                "edges": graph.edges(),
            }))?
        );
        return Ok(());
    }

    let mut nodes: Vec<_> = graph.nodes().collect();
    nodes.sort_by(|a, b| b.doc_count.cmp(&a.doc_count).then_with(|| a.label.cmp(&b.label)));
    nodes.truncate(limit);

    match format {
        OutputFormat::Csv => {
            println!("label,kind,avgYear,docCount");
            for node in &nodes {
                println!(
                    "{},{},{},{}",
                    csv_escape(&node.label),
                    node.kind,
                    node.avg_year.map(|y| format!("{:.1}", y)).unwrap_or_default(),
                    node.doc_count
                );
            }
        }
        _ => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Label", "Kind", "Avg year", "Docs"]);
            for node in &nodes {
                table.add_row(vec![
                    node.label.clone(),
                    node.kind.to_string(),
                    node.avg_year.map(|y| format!("{:.1}", y)).unwrap_or_else(|| "—".into()),
                    node.doc_count.to_string(),
                ]);
            }
            println!("{}", table);
            println!("{} of {} node(s)", nodes.len(), graph.node_count());
        }
    }
    Ok(())
}

fn run_tree(atlas: &Atlas, depth: Option<usize>, format: &OutputFormat) -> Result<(), Box<dyn Error>> {
    let mut tree = atlas.tree.clone();
    if let Some(depth) = depth {
        tree.collapse_to_depth(depth);
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tree.to_view())?);
        }
        OutputFormat::Csv => {
            println!("path,kind,docCount");
            print_tree_csv(&tree, &mut Vec::new());
        }
        OutputFormat::Table => {
            print_tree_indented(&tree, 0);
            println!("{} visible node(s)", tree.visible_len());
        }
    }
    Ok(())
}

fn print_tree_indented(node: &charkha::TreeNode, indent: usize) {
    let marker = if node.is_collapsed() { " [+]" } else { "" };
    println!("{}{} ({}){}", "  ".repeat(indent), node.name, node.doc_count, marker);
    for child in &node.children {
        print_tree_indented(child, indent + 1);
    }
}

fn print_tree_csv(node: &charkha::TreeNode, path: &mut Vec<String>) {
    path.push(node.name.clone());
    println!("{},{:?},{}", csv_escape(&path.join("/")), node.kind, node.doc_count);
    for child in &node.children {
        print_tree_csv(child, path);
    }
    path.pop();
}

fn run_journey(atlas: &Atlas, theme: Option<&str>, format: &OutputFormat) -> Result<(), Box<dyn Error>> {
    let journey = match theme {
        Some(theme) => atlas.journey.filter_theme(theme),
        None => atlas.journey.clone(),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&journey)?);
        }
        OutputFormat::Csv => {
            println!("location,lat,lon,documents,firstYear,lastYear");
            for stop in &journey.stops {
                let (lo, hi) = stop
                    .year_span
                    .map(|(a, b)| (a.to_string(), b.to_string()))
                    .unwrap_or_default();
                println!(
                    "{},{},{},{},{},{}",
                    csv_escape(&stop.location),
                    stop.geo.lat,
                    stop.geo.lon,
                    stop.documents.len(),
                    lo,
                    hi
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Location", "Docs", "Years", "Top themes"]);
            for stop in &journey.stops {
                let years = stop
                    .year_span
                    .map(|(a, b)| if a == b { a.to_string() } else { format!("{}–{}", a, b) })
                    .unwrap_or_else(|| "—".into());
                let themes: Vec<String> = stop
                    .theme_cloud
                    .iter()
                    .take(3)
                    .map(|t| format!("{} ({})", t.theme, t.count))
                    .collect();
                table.add_row(vec![
                    stop.location.clone(),
                    stop.documents.len().to_string(),
                    years,
                    themes.join(", "),
                ]);
            }
            println!("{}", table);
            println!("{} stop(s), {} point(s)", journey.stops.len(), journey.point_count());
        }
    }
    Ok(())
}

fn run_themes(atlas: &Atlas, location: &str, format: &OutputFormat) -> Result<(), Box<dyn Error>> {
    let stop = atlas.journey.stops.iter().find(|s| s.location == location);
    let Some(stop) = stop else {
        return Err(format!("no journey stop for location {:?}", location).into());
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stop.theme_cloud)?);
        }
        OutputFormat::Csv => {
            println!("theme,count");
            for entry in &stop.theme_cloud {
                println!("{},{}", csv_escape(&entry.theme), entry.count);
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Theme", "Docs"]);
            for entry in &stop.theme_cloud {
                table.add_row(vec![entry.theme.clone(), entry.count.to_string()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn run_doc(atlas: &Atlas, id: u64, full: bool, format: &OutputFormat) -> Result<(), Box<dyn Error>> {
    let Some(doc) = atlas.corpus.get(DocId::new(id)) else {
        return Err(format!("no document with id {}", id).into());
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(doc)?);
        }
        _ => {
            println!("Title:    {}", doc.title);
            println!("Date:     {}", if doc.raw_date.is_empty() { "unknown" } else { &doc.raw_date });
            println!("Location: {}", doc.location.as_deref().unwrap_or("unknown"));
            println!("Themes:   {}", doc.themes.iter().cloned().collect::<Vec<_>>().join(", "));
            if full {
                println!();
                println!("{}", doc.text);
            } else if !doc.text.is_empty() {
                let preview: String = doc.text.chars().take(200).collect();
                println!();
                println!("{}…", preview);
            }
        }
    }
    Ok(())
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
