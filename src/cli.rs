//! Command line driver: load a graph document and print what its output nodes produce

use std::path::PathBuf;

use log::{error, info, warn};

use crate::context::AppContext;
use crate::error::FlibberError;
use crate::nodes::data::csv_loader::CsvLoaderParameters;
use crate::nodes::serialization::load_from_file;
use crate::nodes::{NodeData, NodeGraph, NodeGraphEngine, NodeId, NodeRegistry};

const USAGE: &str = "usage: flibbergen <graph.json> [--csv <path>]... [--node <id>]";

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub graph_path: PathBuf,
    pub csv_paths: Vec<String>,
    pub node: Option<NodeId>,
}

impl CliOptions {
    /// Parse `std::env::args()`-style arguments, program name first
    pub fn parse(args: &[String]) -> Result<Self, FlibberError> {
        let mut graph_path = None;
        let mut csv_paths = Vec::new();
        let mut node = None;

        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--csv" => csv_paths.push(required_value(&mut iter, "--csv")?),
                "--node" => {
                    let value = required_value(&mut iter, "--node")?;
                    let id = value
                        .parse::<NodeId>()
                        .map_err(|_| FlibberError::Usage(format!("invalid node id '{}'", value)))?;
                    node = Some(id);
                }
                "-h" | "--help" => return Err(FlibberError::Usage(USAGE.to_string())),
                flag if flag.starts_with("--") => {
                    return Err(FlibberError::Usage(format!("unknown option {}\n{}", flag, USAGE)));
                }
                path if graph_path.is_none() => graph_path = Some(PathBuf::from(path)),
                extra => {
                    return Err(FlibberError::Usage(format!("unexpected argument {}\n{}", extra, USAGE)));
                }
            }
        }

        Ok(Self {
            graph_path: graph_path.ok_or_else(|| FlibberError::Usage(USAGE.to_string()))?,
            csv_paths,
            node,
        })
    }
}

fn required_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<String, FlibberError> {
    iter.next()
        .cloned()
        .ok_or_else(|| FlibberError::Usage(format!("{} needs a value", flag)))
}

pub fn run(args: Vec<String>) -> Result<(), FlibberError> {
    let options = CliOptions::parse(&args)?;
    let registry = NodeRegistry::with_defaults();
    let mut graph = NodeGraph::new();
    let summary = load_from_file(&options.graph_path, &mut graph, &registry)?;
    if summary.skipped_nodes + summary.skipped_edges > 0 {
        warn!(
            "Skipped {} node(s) and {} edge(s) while loading",
            summary.skipped_nodes, summary.skipped_edges
        );
    }

    let context = load_tables(&graph, &options.csv_paths);
    let targets: Vec<NodeId> = match options.node {
        Some(id) => vec![id],
        None => graph
            .nodes
            .values()
            .filter(|node| node.type_id == "Code Generator")
            .map(|node| node.id)
            .collect(),
    };
    if targets.is_empty() {
        warn!("No Code Generator nodes in {}", options.graph_path.display());
    }

    let mut engine = NodeGraphEngine::new();
    for id in targets {
        match engine.request_evaluate(&graph, &context, id) {
            Ok(value) => {
                if let Some(status) = engine.status(id) {
                    info!("Node {}: {}", id, status);
                }
                if let Some(text) = value.as_ref().and_then(render_value) {
                    println!("{}", text);
                }
            }
            Err(err) => error!("Node {}: {}", id, err),
        }
    }
    Ok(())
}

/// Read every CSV the loaders point at plus any extra paths
fn load_tables(graph: &NodeGraph, extra: &[String]) -> AppContext {
    let mut context = AppContext::new();
    let loader_paths = graph
        .nodes
        .values()
        .filter(|node| node.type_id == "CSV Loader")
        .map(|node| CsvLoaderParameters::from_node(node).path)
        .filter(|path| !path.is_empty());

    for path in loader_paths.chain(extra.iter().cloned()) {
        if context.table(&path).is_some() {
            continue;
        }
        if let Err(err) = context.load_table(&path) {
            error!("Failed to load {}: {}", path, err);
        }
    }
    context
}

/// Printable form of an evaluation result
fn render_value(value: &NodeData) -> Option<String> {
    match value {
        NodeData::Text(text) => Some(text.clone()),
        NodeData::Scalar(v) => Some(format!("{:.6}", v)),
        _ => None,
    }
}
