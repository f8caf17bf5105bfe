//! Code generator evaluation

use super::parameters::CodeGeneratorParameters;
use crate::codegen::CodeEmitter;
use crate::constants::codegen::EMPTY_MESSAGE;
use crate::error::EvalError;
use crate::model::Model;
use crate::nodes::execution_engine::Evaluation;
use crate::nodes::interface::NodeData;
use crate::nodes::Node;

/// Render every connected model, in input socket order
pub fn process_code_generator(node: &Node, eval: &mut Evaluation<'_>) -> Result<Option<NodeData>, EvalError> {
    let models: Vec<Model> = eval
        .collect_inputs(node)?
        .into_iter()
        .filter_map(NodeData::into_model)
        .collect();

    let options = CodeGeneratorParameters::from_node(node).emit_options();
    let language = options.language;
    match CodeEmitter::new(options).emit(&models) {
        Some(code) => {
            eval.set_status(node.id, format!("✓ {} from {} model(s)", language, models.len()));
            Ok(Some(NodeData::Text(code)))
        }
        None => {
            eval.set_status(node.id, "No models connected");
            Ok(Some(NodeData::Text(EMPTY_MESSAGE.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AppContext;
    use crate::model::Table;
    use crate::nodes::socket::SocketRef;
    use crate::nodes::{NodeGraph, NodeGraphEngine, NodeRegistry};
    use egui::Pos2;

    fn generate(graph: &NodeGraph, ctx: &AppContext, node: usize) -> String {
        let mut engine = NodeGraphEngine::new();
        engine
            .request_evaluate(graph, ctx, node)
            .unwrap()
            .and_then(|value| value.as_text().map(str::to_string))
            .unwrap()
    }

    #[test]
    fn test_no_models_placeholder() {
        let registry = NodeRegistry::with_defaults();
        let mut graph = NodeGraph::new();
        let gen = graph.create_node(&registry, "Code Generator", Pos2::ZERO).unwrap();
        assert_eq!(generate(&graph, &AppContext::new(), gen), EMPTY_MESSAGE);
    }

    #[test]
    fn test_skips_unconnected_inputs() {
        let registry = NodeRegistry::with_defaults();
        let mut graph = NodeGraph::new();
        let coeffs = graph.create_node(&registry, "Manual Coeffs", Pos2::ZERO).unwrap();
        let gen = graph.create_node(&registry, "Code Generator", Pos2::ZERO).unwrap();
        graph.node_mut(coeffs).unwrap().set_parameter("coefficients", "2.0, 3.0");
        graph.node_mut(coeffs).unwrap().set_parameter("intercept", 1.0);
        // Only the third socket is wired
        graph.connect(SocketRef::output(coeffs, 0), SocketRef::input(gen, 2)).unwrap();
        graph.node_mut(gen).unwrap().set_parameter("smart_libs", false);

        let code = generate(&graph, &AppContext::new(), gen);
        assert!(code.contains("def predict(x):"));
        assert!(code.contains("return 1.000000 + (2.000000 * x) + (3.000000 * x**2)"));
    }

    #[test]
    fn test_split_branches_become_conditional() {
        let registry = NodeRegistry::with_defaults();
        let mut graph = NodeGraph::new();
        let loader = graph.create_node(&registry, "CSV Loader", Pos2::ZERO).unwrap();
        let selector = graph.create_node(&registry, "Column Selector", Pos2::ZERO).unwrap();
        let splitter = graph.create_node(&registry, "Conditional Splitter", Pos2::ZERO).unwrap();
        let fit_true = graph.create_node(&registry, "PolyFit", Pos2::ZERO).unwrap();
        let fit_false = graph.create_node(&registry, "PolyFit", Pos2::ZERO).unwrap();
        let gen = graph.create_node(&registry, "Code Generator", Pos2::ZERO).unwrap();

        graph.node_mut(loader).unwrap().set_parameter("path", "speed.csv");
        graph
            .node_mut(selector)
            .unwrap()
            .set_parameter("features", vec!["speed".to_string()]);
        let split = graph.node_mut(splitter).unwrap();
        split.set_parameter("column", "speed");
        split.set_parameter("value", 3.0);
        for fit in [fit_true, fit_false] {
            graph.node_mut(fit).unwrap().set_parameter("degree", 1i64);
        }
        let generator = graph.node_mut(gen).unwrap();
        generator.set_parameter("language", "C");

        graph.connect(SocketRef::output(loader, 0), SocketRef::input(selector, 0)).unwrap();
        graph.connect(SocketRef::output(selector, 0), SocketRef::input(splitter, 0)).unwrap();
        graph.connect(SocketRef::output(splitter, 0), SocketRef::input(fit_true, 0)).unwrap();
        graph.connect(SocketRef::output(splitter, 1), SocketRef::input(fit_false, 0)).unwrap();
        graph.connect(SocketRef::output(fit_true, 0), SocketRef::input(gen, 0)).unwrap();
        graph.connect(SocketRef::output(fit_false, 0), SocketRef::input(gen, 1)).unwrap();

        let mut ctx = AppContext::new();
        ctx.insert_table(
            "speed.csv",
            Table::new(
                vec!["speed".into(), "y".into()],
                (1..=6).map(|v| vec![v as f64, 2.0 * v as f64]).collect(),
            ),
        );

        let code = generate(&graph, &ctx, gen);
        assert!(code.starts_with("double predict(double speed) {"));
        assert!(code.contains("if (speed > 3.000000) {"));
        assert!(code.contains("} else {"));
    }
}
