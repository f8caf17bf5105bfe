//! Node graph data structures and operations

use std::collections::BTreeMap;

use egui::Pos2;
use log::debug;

use super::factory::NodeRegistry;
use super::node::{Node, NodeId};
use super::socket::{SocketDirection, SocketRef};
use crate::error::GraphError;

/// Unique identifier for an edge
pub type EdgeId = usize;

/// Directed link from an output socket to an input socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub start: SocketRef,
    pub end: SocketRef,
}

/// A graph containing nodes and the edges between their sockets
#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    pub nodes: BTreeMap<NodeId, Node>,
    pub edges: BTreeMap<EdgeId, Edge>,
    next_node_id: NodeId,
    next_edge_id: EdgeId,
}

impl NodeGraph {
    /// Creates a new empty node graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the graph and returns its ID
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.next_node_id;
        node.id = id;
        for socket in node.inputs.iter_mut().chain(node.outputs.iter_mut()) {
            socket.edges.clear();
        }
        self.nodes.insert(id, node);
        self.next_node_id += 1;
        id
    }

    /// Instantiate a registered node type and add it
    pub fn create_node(&mut self, registry: &NodeRegistry, node_type: &str, position: Pos2) -> Result<NodeId, GraphError> {
        let node = registry
            .create_node(node_type, position)
            .ok_or_else(|| GraphError::UnknownNodeType(node_type.to_string()))?;
        Ok(self.add_node(node))
    }

    /// Removes a node after detaching every edge on its sockets. Absent nodes are ignored.
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let attached: Vec<EdgeId> = self
            .nodes
            .get(&node_id)?
            .sockets()
            .flat_map(|socket| socket.edges.iter().copied())
            .collect();
        for edge_id in attached {
            self.disconnect(edge_id);
        }
        self.nodes.remove(&node_id)
    }

    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    pub fn edge(&self, edge_id: EdgeId) -> Option<&Edge> {
        self.edges.get(&edge_id)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Connect an output socket to an input socket, in either argument order.
    ///
    /// An input holds at most one edge, so an existing edge on the input is
    /// removed first. Output sockets fan out freely.
    pub fn connect(&mut self, a: SocketRef, b: SocketRef) -> Result<EdgeId, GraphError> {
        if a.direction == b.direction {
            return Err(GraphError::InvalidDirection);
        }
        let (start, end) = match a.direction {
            SocketDirection::Output => (a, b),
            SocketDirection::Input => (b, a),
        };
        self.check_socket(start)?;
        self.check_socket(end)?;

        let replaced: Vec<EdgeId> = self
            .socket_edges(end)
            .map(|edges| edges.to_vec())
            .unwrap_or_default();
        for edge_id in replaced {
            debug!("Replacing edge {} on input {}:{}", edge_id, end.node, end.index);
            self.disconnect(edge_id);
        }

        let id = self.next_edge_id;
        self.next_edge_id += 1;
        self.edges.insert(id, Edge { id, start, end });
        for endpoint in [start, end] {
            if let Some(socket) = self
                .nodes
                .get_mut(&endpoint.node)
                .and_then(|node| node.socket_mut(endpoint.direction, endpoint.index))
            {
                socket.edges.push(id);
            }
        }
        Ok(id)
    }

    /// Remove an edge and deregister it from both sockets. Unknown edges are ignored.
    pub fn disconnect(&mut self, edge_id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(&edge_id)?;
        for endpoint in [edge.start, edge.end] {
            if let Some(socket) = self
                .nodes
                .get_mut(&endpoint.node)
                .and_then(|node| node.socket_mut(endpoint.direction, endpoint.index))
            {
                socket.edges.retain(|&id| id != edge_id);
            }
        }
        Some(edge)
    }

    /// The edge feeding an input socket, if any
    pub fn input_edge(&self, node_id: NodeId, index: usize) -> Option<&Edge> {
        let socket = self.nodes.get(&node_id)?.inputs.get(index)?;
        socket.edges.first().and_then(|id| self.edges.get(id))
    }

    /// Remove every node and edge
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    fn check_socket(&self, socket: SocketRef) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get(&socket.node)
            .ok_or(GraphError::UnknownNode(socket.node))?;
        node.socket(socket.direction, socket.index)
            .map(|_| ())
            .ok_or(GraphError::UnknownSocket {
                node: socket.node,
                index: socket.index,
                direction: socket.direction,
            })
    }

    fn socket_edges(&self, socket: SocketRef) -> Option<&[EdgeId]> {
        self.nodes
            .get(&socket.node)
            .and_then(|node| node.socket(socket.direction, socket.index))
            .map(|s| s.edges.as_slice())
    }
}
