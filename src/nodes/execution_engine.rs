//! Node graph execution engine
//!
//! Evaluation is pull-based and demand-driven: a request names one node, and
//! that node pulls each input by evaluating whatever feeds it. Nothing is
//! cached, so every request recomputes the whole upstream chain and always
//! reflects the current parameters.

use std::collections::HashMap;

use log::debug;

use crate::context::AppContext;
use crate::error::EvalError;
use crate::nodes::interface::NodeData;
use crate::nodes::{data, logic, math, output};
use crate::nodes::{Node, NodeGraph, NodeId};

/// Outcome of the most recent evaluation of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Not evaluated since the engine was created or the node was reset
    Idle,
    /// On the current evaluation path
    Computing,
    /// Produced a value
    Evaluated,
    /// Ran but had nothing to produce
    Empty,
    /// Evaluation was aborted
    Error,
}

/// Holds per-node state and status text between evaluation requests
#[derive(Debug, Default)]
pub struct NodeGraphEngine {
    node_states: HashMap<NodeId, NodeState>,
    statuses: HashMap<NodeId, String>,
}

impl NodeGraphEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a node's first output
    pub fn request_evaluate(
        &mut self,
        graph: &NodeGraph,
        context: &AppContext,
        node_id: NodeId,
    ) -> Result<Option<NodeData>, EvalError> {
        self.request_evaluate_output(graph, context, node_id, 0)
    }

    /// Evaluate the value a node exposes on a given output socket
    pub fn request_evaluate_output(
        &mut self,
        graph: &NodeGraph,
        context: &AppContext,
        node_id: NodeId,
        output_index: usize,
    ) -> Result<Option<NodeData>, EvalError> {
        let mut evaluation = Evaluation {
            graph,
            context,
            engine: self,
        };
        evaluation.evaluate(node_id, output_index)
    }

    pub fn get_node_state(&self, node_id: NodeId) -> NodeState {
        self.node_states.get(&node_id).copied().unwrap_or(NodeState::Idle)
    }

    /// Status line last reported by a node
    pub fn status(&self, node_id: NodeId) -> Option<&str> {
        self.statuses.get(&node_id).map(String::as_str)
    }

    /// Forget everything about a removed node
    pub fn on_node_removed(&mut self, node_id: NodeId) {
        self.node_states.remove(&node_id);
        self.statuses.remove(&node_id);
    }

    /// Reset every node to idle and clear all status text
    pub fn reset(&mut self) {
        self.node_states.clear();
        self.statuses.clear();
    }

    /// Get execution statistics
    pub fn get_stats(&self) -> ExecutionStats {
        let mut stats = ExecutionStats {
            total_nodes: self.node_states.len(),
            ..ExecutionStats::default()
        };
        for state in self.node_states.values() {
            match state {
                NodeState::Idle => {}
                NodeState::Computing => stats.computing_nodes += 1,
                NodeState::Evaluated => stats.evaluated_nodes += 1,
                NodeState::Empty => stats.empty_nodes += 1,
                NodeState::Error => stats.error_nodes += 1,
            }
        }
        stats
    }
}

/// Statistics about the execution engine state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    pub total_nodes: usize,
    pub computing_nodes: usize,
    pub evaluated_nodes: usize,
    pub empty_nodes: usize,
    pub error_nodes: usize,
}

/// One in-flight evaluation request
pub struct Evaluation<'a> {
    graph: &'a NodeGraph,
    context: &'a AppContext,
    engine: &'a mut NodeGraphEngine,
}

impl<'a> Evaluation<'a> {
    pub fn graph(&self) -> &'a NodeGraph {
        self.graph
    }

    pub fn context(&self) -> &'a AppContext {
        self.context
    }

    /// Run a node for the given output socket.
    ///
    /// A node reached again while it is still on the evaluation path means the
    /// graph has a cycle, which aborts the whole request.
    pub fn evaluate(&mut self, node_id: NodeId, output_index: usize) -> Result<Option<NodeData>, EvalError> {
        let graph = self.graph;
        let node = graph.node(node_id).ok_or(EvalError::UnknownNode(node_id))?;

        if self.engine.get_node_state(node_id) == NodeState::Computing {
            return Err(EvalError::CyclicGraph(node_id));
        }
        self.engine.node_states.insert(node_id, NodeState::Computing);

        let result = dispatch_node_execution(node, self, output_index);
        let state = match &result {
            Ok(Some(_)) => NodeState::Evaluated,
            Ok(None) => NodeState::Empty,
            Err(_) => NodeState::Error,
        };
        self.engine.node_states.insert(node_id, state);
        result
    }

    /// Value arriving on an input socket; `None` when nothing is connected
    pub fn get_input_value(&mut self, node_id: NodeId, index: usize) -> Result<Option<NodeData>, EvalError> {
        let graph = self.graph;
        match graph.input_edge(node_id, index) {
            Some(edge) => {
                debug!("Node {} input {} pulls from node {} output {}", node_id, index, edge.start.node, edge.start.index);
                self.evaluate(edge.start.node, edge.start.index)
            }
            None => Ok(None),
        }
    }

    /// Values on every connected input, in socket order
    pub fn collect_inputs(&mut self, node: &Node) -> Result<Vec<NodeData>, EvalError> {
        let mut values = Vec::new();
        for index in 0..node.inputs.len() {
            if let Some(value) = self.get_input_value(node.id, index)? {
                values.push(value);
            }
        }
        Ok(values)
    }

    pub fn set_status(&mut self, node_id: NodeId, status: impl Into<String>) {
        self.engine.statuses.insert(node_id, status.into());
    }
}

/// Dispatch node execution based on node type_id
fn dispatch_node_execution(
    node: &Node,
    eval: &mut Evaluation<'_>,
    output_index: usize,
) -> Result<Option<NodeData>, EvalError> {
    match node.type_id.as_str() {
        // Data nodes
        "CSV Loader" => data::csv_loader::process_csv_loader(node, eval),
        "Column Selector" => data::column_selector::process_column_selector(node, eval),

        // Logic nodes
        "Conditional Splitter" => logic::splitter::process_splitter(node, eval, output_index),
        "Range Filter" => logic::range_filter::process_range_filter(node, eval),

        // Math nodes
        "PolyFit" => math::polyfit::process_polyfit(node, eval),
        "Neural Network" => math::neural_net::process_neural_net(node, eval),
        "Manual Coeffs" => math::manual_coeffs::process_manual_coeffs(node, eval),

        // Output nodes
        "Code Generator" => output::code_generator::process_code_generator(node, eval),
        "Inspector" => output::inspector::process_inspector(node, eval),
        "Live Tester" => output::live_tester::process_live_tester(node, eval),
        "Graph View" => output::graph_view::process_graph_view(node, eval),

        other => {
            debug!("No evaluation registered for node type {}", other);
            Ok(None)
        }
    }
}
