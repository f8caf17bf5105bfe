//! Socket types and functionality for node connections

use serde::{Deserialize, Serialize};

use super::graph::EdgeId;
use super::node::NodeId;

/// Direction of a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketDirection {
    Input,
    Output,
}

impl SocketDirection {
    pub fn opposite(&self) -> Self {
        match self {
            SocketDirection::Input => SocketDirection::Output,
            SocketDirection::Output => SocketDirection::Input,
        }
    }
}

/// Connection point owned by a node
#[derive(Debug, Clone, PartialEq)]
pub struct Socket {
    pub index: usize,
    pub name: String,
    pub direction: SocketDirection,
    /// Attached edges; never more than one on an input
    pub edges: Vec<EdgeId>,
}

impl Socket {
    pub fn new(index: usize, name: impl Into<String>, direction: SocketDirection) -> Self {
        Self {
            index,
            name: name.into(),
            direction,
            edges: Vec::new(),
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self.direction, SocketDirection::Input)
    }

    pub fn is_output(&self) -> bool {
        matches!(self.direction, SocketDirection::Output)
    }

    pub fn is_connected(&self) -> bool {
        !self.edges.is_empty()
    }
}

/// Address of a socket inside a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketRef {
    pub node: NodeId,
    pub direction: SocketDirection,
    pub index: usize,
}

impl SocketRef {
    pub fn input(node: NodeId, index: usize) -> Self {
        Self { node, direction: SocketDirection::Input, index }
    }

    pub fn output(node: NodeId, index: usize) -> Self {
        Self { node, direction: SocketDirection::Output, index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_direction() {
        let socket = Socket::new(0, "Data", SocketDirection::Input);
        assert!(socket.is_input());
        assert!(!socket.is_output());
        assert!(!socket.is_connected());
        assert_eq!(SocketDirection::Input.opposite(), SocketDirection::Output);
    }

    #[test]
    fn test_socket_ref_constructors() {
        assert_eq!(SocketRef::output(3, 1).direction, SocketDirection::Output);
        assert_eq!(SocketRef::input(3, 1), SocketRef { node: 3, direction: SocketDirection::Input, index: 1 });
    }
}
