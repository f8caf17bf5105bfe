//! Node types and core node functionality

use std::collections::BTreeMap;

use egui::{Color32, Pos2, Rect, Vec2};

use super::params::ParamValue;
use super::socket::{Socket, SocketDirection};
use crate::constants::layout;

/// Unique identifier for a node within one session
pub type NodeId = usize;

/// A unit of computation in the pipeline graph
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Registry tag, e.g. "PolyFit"
    pub type_id: String,
    pub title: String,
    pub position: Pos2,
    pub inputs: Vec<Socket>,
    pub outputs: Vec<Socket>,
    pub color: Color32,
    pub parameters: BTreeMap<String, ParamValue>,
}

impl Node {
    /// Creates a new node with the specified properties
    pub fn new(id: NodeId, type_id: impl Into<String>, position: Pos2) -> Self {
        let type_id = type_id.into();
        Self {
            id,
            title: type_id.clone(),
            type_id,
            position,
            inputs: vec![],
            outputs: vec![],
            color: Color32::from_rgb(60, 60, 60),
            parameters: BTreeMap::new(),
        }
    }

    /// Adds an input socket to the node
    pub fn add_input(&mut self, name: impl Into<String>) -> &mut Self {
        let index = self.inputs.len();
        self.inputs.push(Socket::new(index, name, SocketDirection::Input));
        self
    }

    /// Adds an output socket to the node
    pub fn add_output(&mut self, name: impl Into<String>) -> &mut Self {
        let index = self.outputs.len();
        self.outputs.push(Socket::new(index, name, SocketDirection::Output));
        self
    }

    pub fn socket(&self, direction: SocketDirection, index: usize) -> Option<&Socket> {
        match direction {
            SocketDirection::Input => self.inputs.get(index),
            SocketDirection::Output => self.outputs.get(index),
        }
    }

    pub fn socket_mut(&mut self, direction: SocketDirection, index: usize) -> Option<&mut Socket> {
        match direction {
            SocketDirection::Input => self.inputs.get_mut(index),
            SocketDirection::Output => self.outputs.get_mut(index),
        }
    }

    pub fn sockets(&self) -> impl Iterator<Item = &Socket> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    pub fn parameter(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(name)
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.parameters.insert(name.into(), value.into());
    }

    /// Bounding rectangle, tall enough for the larger socket column
    pub fn get_rect(&self) -> Rect {
        let rows = self.inputs.len().max(self.outputs.len()) as f32;
        let height = layout::HEADER_HEIGHT + layout::FIRST_SOCKET_OFFSET + rows * layout::SOCKET_SPACING;
        Rect::from_min_size(self.position, Vec2::new(layout::NODE_WIDTH, height))
    }

    /// Sets the color of the node
    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_indices_follow_insertion() {
        let mut node = Node::new(0, "Graph View", Pos2::ZERO);
        node.add_input("Model").add_input("Data");
        node.add_output("Out");
        assert_eq!(node.inputs[1].index, 1);
        assert_eq!(node.inputs[1].name, "Data");
        assert!(node.socket(SocketDirection::Output, 0).is_some());
        assert!(node.socket(SocketDirection::Output, 1).is_none());
        assert_eq!(node.sockets().count(), 3);
    }

    #[test]
    fn test_parameters() {
        let mut node = Node::new(0, "PolyFit", Pos2::ZERO);
        node.set_parameter("degree", 3i64);
        assert_eq!(node.parameter("degree").and_then(ParamValue::as_i64), Some(3));
        assert!(node.parameter("missing").is_none());
    }

    #[test]
    fn test_rect_grows_with_sockets() {
        let mut node = Node::new(0, "Code Generator", Pos2::new(10.0, 20.0));
        let empty = node.get_rect();
        for i in 0..4 {
            node.add_input(format!("Model {}", i + 1));
        }
        let rect = node.get_rect();
        assert_eq!(rect.min, Pos2::new(10.0, 20.0));
        assert_eq!(rect.width(), layout::NODE_WIDTH);
        assert!(rect.height() > empty.height());
    }
}
