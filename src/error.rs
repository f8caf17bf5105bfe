//! Error taxonomy for the graph engine, evaluation, persistence and fitting

use thiserror::Error;

use crate::nodes::socket::SocketDirection;
use crate::nodes::NodeId;

/// Structural errors raised by graph mutation. The graph is left unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),
    #[error("Node {0} is not in the graph")]
    UnknownNode(NodeId),
    #[error("Node {node} has no {direction:?} socket at index {index}")]
    UnknownSocket {
        node: NodeId,
        index: usize,
        direction: SocketDirection,
    },
    #[error("A connection needs exactly one output socket and one input socket")]
    InvalidDirection,
}

/// Errors that abort an evaluation request. Missing upstream values are not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Cycle detected while evaluating node {0}")]
    CyclicGraph(NodeId),
    #[error("Node {0} is not in the graph")]
    UnknownNode(NodeId),
}

/// Failures while reading or writing a persisted graph document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures reported by fit/predict collaborators
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("empty data")]
    EmptyData,
    #[error("expected {expected} features, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("singular system")]
    Singular,
    #[error("non-finite input")]
    NonFinite,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("{0}")]
    Unavailable(String),
}

/// CSV parsing and loading failures
#[derive(Error, Debug)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV has no header row")]
    Empty,
    #[error("line {line}: wrong number of fields")]
    RaggedRow { line: u64 },
}

/// Crate-level error used by the binary
#[derive(Error, Debug)]
pub enum FlibberError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Fit(#[from] FitError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("{0}")]
    Usage(String),
}

/// Render a collaborator failure as the short status line shown next to a node
pub fn status_text(err: &impl std::fmt::Display) -> String {
    let message: String = err
        .to_string()
        .chars()
        .take(crate::constants::status::ERROR_TRUNCATE_CHARS)
        .collect();
    format!("Error: {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_truncates_message() {
        let err = FitError::InvalidParameter("hidden layer sizes must be positive".into());
        let status = status_text(&err);
        assert_eq!(status, "Error: invalid parameter: h");
        assert_eq!(status.chars().count(), "Error: ".len() + 20);
    }

    #[test]
    fn test_status_text_short_message() {
        assert_eq!(status_text(&FitError::Singular), "Error: singular system");
    }

    #[test]
    fn test_document_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DocumentError = io.into();
        assert!(matches!(err, DocumentError::Io(_)));
    }
}
