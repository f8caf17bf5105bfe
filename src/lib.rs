//! FlibberGen core library
//!
//! A pull-based node graph for building regression models from tables and
//! exporting them as standalone `predict` functions in Python, C or Java.

pub mod cli;
pub mod codegen;
pub mod constants;
pub mod context;
pub mod error;
pub mod model;
pub mod nodes;

// Re-export commonly used types
pub use cli::run;
pub use context::AppContext;
pub use error::{EvalError, FlibberError, GraphError};
pub use model::{Model, ModelKind};
pub use nodes::{NodeData, NodeGraph, NodeGraphEngine, NodeRegistry};
