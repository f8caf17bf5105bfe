//! Node system - graph core, evaluation and the node catalog

// Core node system modules
pub mod graph;
pub mod node;
pub mod socket;
pub mod params;
pub mod factory;
pub mod interface;
pub mod execution_engine;
pub mod serialization;
pub mod interaction;

// Node implementations by category
pub mod data;
pub mod logic;
pub mod math;
pub mod output;

// Re-export core types
pub use graph::{Edge, EdgeId, NodeGraph};
pub use node::{Node, NodeId};
pub use socket::{Socket, SocketDirection, SocketRef};
pub use params::ParamValue;

// Re-export factory types
pub use factory::{NodeCategory, NodeFactory, NodeMetadata, NodeRegistry, PortDefinition};

// Re-export interface types
pub use interface::{NodeData, PlotData};

// Re-export execution engine types
pub use execution_engine::{Evaluation, ExecutionStats, NodeGraphEngine, NodeState};

pub use serialization::{GraphDocument, LoadSummary};
pub use interaction::ConnectionDrag;
