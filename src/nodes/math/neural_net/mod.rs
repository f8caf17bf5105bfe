//! Neural network node
//!
//! Training is delegated to the trainer collaborator held by the
//! application context; without one the node reports it and yields nothing.

mod functions;
pub mod parameters;

pub use functions::*;
pub use parameters::*;

use egui::Color32;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

#[derive(Default)]
pub struct NeuralNetNodeFactory;

impl NodeFactory for NeuralNetNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Neural Network",
            "Neural Network",
            NodeCategory::math(),
            "Trains a multilayer perceptron regressor",
        )
        .with_color(Color32::from_rgb(55, 45, 70))
        .with_inputs(vec![PortDefinition::required("Dataset")])
        .with_outputs(vec![PortDefinition::required("Model")])
        .with_tags(vec!["math", "regression", "neural", "mlp"])
        .with_parameters(NeuralNetParameters::default().to_parameters())
    }
}
