//! Socket layout, hit testing and the connect drag gesture
//!
//! The gesture keeps its preview edge outside the graph: nothing is added to
//! the edge set until the pointer is released over a socket of the opposite
//! direction.

use egui::Pos2;
use log::debug;

use super::graph::EdgeId;
use super::socket::{SocketDirection, SocketRef};
use super::{Node, NodeGraph};
use crate::constants::layout;
use crate::error::GraphError;

/// Canvas position of a socket: inputs on the left edge, outputs on the right
pub fn socket_position(node: &Node, direction: SocketDirection, index: usize) -> Pos2 {
    let x = match direction {
        SocketDirection::Input => node.position.x,
        SocketDirection::Output => node.position.x + layout::NODE_WIDTH,
    };
    let y = node.position.y
        + layout::HEADER_HEIGHT
        + layout::FIRST_SOCKET_OFFSET
        + index as f32 * layout::SOCKET_SPACING;
    Pos2::new(x, y)
}

/// The socket under `point`, if any
pub fn find_socket_at(graph: &NodeGraph, point: Pos2) -> Option<SocketRef> {
    graph.nodes.values().find_map(|node| {
        node.sockets().find_map(|socket| {
            let pos = socket_position(node, socket.direction, socket.index);
            (pos.distance(point) <= layout::SOCKET_RADIUS).then_some(SocketRef {
                node: node.id,
                direction: socket.direction,
                index: socket.index,
            })
        })
    })
}

/// A connection being dragged out of a socket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionDrag {
    pub origin: SocketRef,
    pub pointer: Pos2,
}

impl ConnectionDrag {
    /// Begin a drag if `point` is over a socket
    pub fn start(graph: &NodeGraph, point: Pos2) -> Option<Self> {
        let origin = find_socket_at(graph, point)?;
        debug!("Connection drag from node {} socket {}", origin.node, origin.index);
        Some(Self {
            origin,
            pointer: point,
        })
    }

    pub fn update(&mut self, pointer: Pos2) {
        self.pointer = pointer;
    }

    /// Endpoints of the temporary edge, origin socket first
    pub fn preview(&self, graph: &NodeGraph) -> Option<(Pos2, Pos2)> {
        let node = graph.node(self.origin.node)?;
        Some((
            socket_position(node, self.origin.direction, self.origin.index),
            self.pointer,
        ))
    }

    /// Finish the gesture at `point`.
    ///
    /// Returns `None` when the gesture is abandoned: no socket under the
    /// pointer, or a socket with the same direction as the origin.
    pub fn release(self, graph: &mut NodeGraph, point: Pos2) -> Option<Result<EdgeId, GraphError>> {
        let target = find_socket_at(graph, point)?;
        if target.direction == self.origin.direction {
            debug!("Connection drag abandoned on a {:?} socket", target.direction);
            return None;
        }
        Some(graph.connect(self.origin, target))
    }
}
