//! CSV loader evaluation

use std::path::Path;

use super::parameters::CsvLoaderParameters;
use crate::error::EvalError;
use crate::nodes::execution_engine::Evaluation;
use crate::nodes::interface::NodeData;
use crate::nodes::Node;

/// Hand out the table registered for the node's path
pub fn process_csv_loader(node: &Node, eval: &mut Evaluation<'_>) -> Result<Option<NodeData>, EvalError> {
    let params = CsvLoaderParameters::from_node(node);
    let table = match eval.context().table(&params.path) {
        Some(table) if !params.path.is_empty() => table.clone(),
        _ => {
            eval.set_status(node.id, "No file loaded");
            return Ok(None);
        }
    };

    eval.set_status(node.id, format!("✓ {}", file_name(&params.path)));
    Ok(Some(NodeData::Table(table)))
}

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AppContext;
    use crate::model::Table;
    use crate::nodes::{NodeGraph, NodeGraphEngine, NodeRegistry};
    use egui::Pos2;

    #[test]
    fn test_loader_without_table() {
        let registry = NodeRegistry::with_defaults();
        let mut graph = NodeGraph::new();
        let loader = graph.create_node(&registry, "CSV Loader", Pos2::ZERO).unwrap();
        graph.node_mut(loader).unwrap().set_parameter("path", "missing.csv");

        let mut engine = NodeGraphEngine::new();
        assert_eq!(engine.request_evaluate(&graph, &AppContext::new(), loader), Ok(None));
        assert_eq!(engine.status(loader), Some("No file loaded"));
    }

    #[test]
    fn test_loader_returns_context_table() {
        let registry = NodeRegistry::with_defaults();
        let mut graph = NodeGraph::new();
        let loader = graph.create_node(&registry, "CSV Loader", Pos2::ZERO).unwrap();
        graph.node_mut(loader).unwrap().set_parameter("path", "data/runs.csv");

        let mut ctx = AppContext::new();
        let table = Table::new(vec!["a".into()], vec![vec![1.0]]);
        ctx.insert_table("data/runs.csv", table.clone());

        let mut engine = NodeGraphEngine::new();
        let value = engine.request_evaluate(&graph, &ctx, loader).unwrap();
        assert_eq!(value.and_then(NodeData::into_table), Some(table));
        assert_eq!(engine.status(loader), Some("✓ runs.csv"));
    }
}
