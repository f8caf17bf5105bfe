//! Graph document persistence
//!
//! Node ids in a document are transient: they are the position of the node
//! in the graph's iteration order at save time and only serve to resolve the
//! edge list on load.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use egui::Pos2;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::factory::NodeRegistry;
use super::params::ParamValue;
use super::socket::SocketRef;
use super::{Node, NodeGraph, NodeId};
use crate::error::DocumentError;

/// The persisted form of a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub id: usize,
    #[serde(rename = "type")]
    pub node_type: String,
    pub x: f32,
    pub y: f32,
    /// Node-specific parameters, stored alongside the fixed keys
    #[serde(flatten)]
    pub parameters: BTreeMap<String, ParamValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub start_node_id: usize,
    pub end_node_id: usize,
    pub start_socket_index: usize,
    pub end_socket_index: usize,
}

/// Counts of what a load kept and skipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub nodes: usize,
    pub edges: usize,
    pub skipped_nodes: usize,
    pub skipped_edges: usize,
}

/// Snapshot the graph as a document
pub fn serialize(graph: &NodeGraph) -> GraphDocument {
    let transient: HashMap<NodeId, usize> = graph
        .nodes
        .keys()
        .enumerate()
        .map(|(index, id)| (*id, index))
        .collect();

    let nodes = graph
        .nodes
        .values()
        .enumerate()
        .map(|(index, node)| NodeEntry {
            id: index,
            node_type: node.type_id.clone(),
            x: node.position.x,
            y: node.position.y,
            parameters: node.parameters.clone(),
        })
        .collect();

    let edges = graph
        .edges
        .values()
        .filter_map(|edge| {
            Some(EdgeEntry {
                start_node_id: *transient.get(&edge.start.node)?,
                end_node_id: *transient.get(&edge.end.node)?,
                start_socket_index: edge.start.index,
                end_socket_index: edge.end.index,
            })
        })
        .collect();

    GraphDocument { nodes, edges }
}

/// Replace the graph's contents with the document.
///
/// Unknown node types and edges that reference missing nodes or out-of-range
/// sockets are skipped with a warning. Only parameter keys the created node
/// already has are applied; absent keys keep their defaults.
pub fn deserialize<F>(graph: &mut NodeGraph, document: &GraphDocument, node_factory: F) -> LoadSummary
where
    F: Fn(&str, Pos2) -> Option<Node>,
{
    graph.clear();
    let mut summary = LoadSummary::default();
    let mut ids: HashMap<usize, NodeId> = HashMap::new();

    for entry in &document.nodes {
        let Some(mut node) = node_factory(&entry.node_type, Pos2::new(entry.x, entry.y)) else {
            warn!("Skipping node {} of unknown type {}", entry.id, entry.node_type);
            summary.skipped_nodes += 1;
            continue;
        };
        for (key, value) in &entry.parameters {
            if let Some(slot) = node.parameters.get_mut(key) {
                *slot = value.clone();
            }
        }
        ids.insert(entry.id, graph.add_node(node));
        summary.nodes += 1;
    }

    for entry in &document.edges {
        match resolve_edge(graph, &ids, entry) {
            Some((start, end)) => match graph.connect(start, end) {
                Ok(_) => summary.edges += 1,
                Err(err) => {
                    warn!("Skipping edge {:?}: {}", entry, err);
                    summary.skipped_edges += 1;
                }
            },
            None => {
                warn!("Skipping edge {:?}: unknown node or socket", entry);
                summary.skipped_edges += 1;
            }
        }
    }
    summary
}

fn resolve_edge(
    graph: &NodeGraph,
    ids: &HashMap<usize, NodeId>,
    entry: &EdgeEntry,
) -> Option<(SocketRef, SocketRef)> {
    let start = *ids.get(&entry.start_node_id)?;
    let end = *ids.get(&entry.end_node_id)?;
    if entry.start_socket_index >= graph.node(start)?.outputs.len()
        || entry.end_socket_index >= graph.node(end)?.inputs.len()
    {
        return None;
    }
    Some((
        SocketRef::output(start, entry.start_socket_index),
        SocketRef::input(end, entry.end_socket_index),
    ))
}

/// Write the graph as pretty-printed JSON
pub fn save_to_file(path: &Path, graph: &NodeGraph) -> Result<(), DocumentError> {
    let json = serde_json::to_string_pretty(&serialize(graph))?;
    std::fs::write(path, json)?;
    info!("Saved {} nodes to {}", graph.nodes.len(), path.display());
    Ok(())
}

/// Read a JSON document into the graph, creating nodes through the registry
pub fn load_from_file(
    path: &Path,
    graph: &mut NodeGraph,
    registry: &NodeRegistry,
) -> Result<LoadSummary, DocumentError> {
    let content = std::fs::read_to_string(path)?;
    let document: GraphDocument = serde_json::from_str(&content)?;
    let summary = deserialize(graph, &document, |node_type, pos| registry.create_node(node_type, pos));
    info!(
        "Loaded {} nodes and {} edges from {}",
        summary.nodes,
        summary.edges,
        path.display()
    );
    Ok(summary)
}
