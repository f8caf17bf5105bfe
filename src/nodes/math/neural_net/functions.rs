//! Neural network evaluation

use log::info;

use super::parameters::NeuralNetParameters;
use crate::error::{status_text, EvalError};
use crate::model::FitRequest;
use crate::nodes::execution_engine::Evaluation;
use crate::nodes::interface::NodeData;
use crate::nodes::math::annotate_model;
use crate::nodes::Node;

pub fn process_neural_net(node: &Node, eval: &mut Evaluation<'_>) -> Result<Option<NodeData>, EvalError> {
    let data = match eval.get_input_value(node.id, 0)?.and_then(NodeData::into_dataset) {
        Some(data) => data,
        None => {
            eval.set_status(node.id, "No data connected");
            return Ok(None);
        }
    };
    if data.is_empty() {
        eval.set_status(node.id, "Empty data");
        return Ok(None);
    }

    let spec = match NeuralNetParameters::from_node(node).fit_spec() {
        Ok(spec) => spec,
        Err(err) => {
            eval.set_status(node.id, status_text(&err));
            return Ok(None);
        }
    };
    let Some(trainer) = eval.context().trainer() else {
        eval.set_status(node.id, "No trainer available");
        return Ok(None);
    };

    match trainer.fit(&FitRequest::new(&data.x, &data.y, spec)) {
        Ok(model) => {
            let model = annotate_model(model, &data);
            info!("Neural Network node {}: trained with {}", node.id, trainer.name());
            let status = match model.info.r2 {
                Some(r2) => format!("✓ R²={:.4}", r2),
                None => "✓ Trained".to_string(),
            };
            eval.set_status(node.id, status);
            Ok(Some(NodeData::Model(model)))
        }
        Err(err) => {
            eval.set_status(node.id, status_text(&err));
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::context::AppContext;
    use crate::error::FitError;
    use crate::model::{
        Activation, DenseLayer, FitRequest, Model, ModelFitter, ModelInfo, NeuralNetwork, Table,
    };
    use crate::nodes::interface::NodeData;
    use crate::nodes::socket::SocketRef;
    use crate::nodes::{NodeGraph, NodeGraphEngine, NodeId, NodeRegistry};
    use egui::Pos2;

    /// Returns a fixed single-layer network regardless of the data
    struct FixedTrainer;

    impl ModelFitter for FixedTrainer {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fit(&self, request: &FitRequest<'_>) -> Result<Model, FitError> {
            request.validate()?;
            let output = DenseLayer {
                weights: vec![vec![2.0]],
                biases: vec![1.0],
            };
            let network = NeuralNetwork::new(vec![output], Activation::Identity)?;
            Ok(Model::neural(network, ModelInfo::default()))
        }
    }

    fn graph() -> (NodeGraph, NodeId) {
        let registry = NodeRegistry::with_defaults();
        let mut graph = NodeGraph::new();
        let loader = graph.create_node(&registry, "CSV Loader", Pos2::ZERO).unwrap();
        let selector = graph.create_node(&registry, "Column Selector", Pos2::ZERO).unwrap();
        let net = graph.create_node(&registry, "Neural Network", Pos2::ZERO).unwrap();
        graph.node_mut(loader).unwrap().set_parameter("path", "nn.csv");
        graph
            .node_mut(selector)
            .unwrap()
            .set_parameter("features", vec!["a".to_string()]);
        graph.connect(SocketRef::output(loader, 0), SocketRef::input(selector, 0)).unwrap();
        graph.connect(SocketRef::output(selector, 0), SocketRef::input(net, 0)).unwrap();
        (graph, net)
    }

    fn table() -> Table {
        Table::new(vec!["a".into(), "y".into()], vec![vec![1.0, 3.0], vec![2.0, 5.0]])
    }

    #[test]
    fn test_without_trainer() {
        let (graph, net) = graph();
        let mut ctx = AppContext::new();
        ctx.insert_table("nn.csv", table());

        let mut engine = NodeGraphEngine::new();
        assert_eq!(engine.request_evaluate(&graph, &ctx, net), Ok(None));
        assert_eq!(engine.status(net), Some("No trainer available"));
    }

    #[test]
    fn test_with_trainer() {
        let (graph, net) = graph();
        let mut ctx = AppContext::new().with_trainer(Box::new(FixedTrainer));
        ctx.insert_table("nn.csv", table());

        let mut engine = NodeGraphEngine::new();
        let model = engine
            .request_evaluate(&graph, &ctx, net)
            .unwrap()
            .and_then(NodeData::into_model)
            .unwrap();
        assert_eq!(engine.status(net), Some("✓ Trained"));
        assert_eq!(model.info.input_feature_names, vec!["a"]);
        assert_eq!(model.predict_row(&[3.0]).unwrap(), 7.0);
    }

    #[test]
    fn test_invalid_layers_reported_before_training() {
        let (mut graph, net) = graph();
        graph.node_mut(net).unwrap().set_parameter("hidden_layers", "ten");
        let mut ctx = AppContext::new().with_trainer(Box::new(FixedTrainer));
        ctx.insert_table("nn.csv", table());

        let mut engine = NodeGraphEngine::new();
        assert_eq!(engine.request_evaluate(&graph, &ctx, net), Ok(None));
        assert!(engine.status(net).unwrap().starts_with("Error: invalid parameter"));
    }
}
