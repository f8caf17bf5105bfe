//! PolyFit node
//!
//! - mod.rs: node metadata and factory implementation
//! - functions.rs: fitting through the context's polynomial fitter
//! - parameters.rs: degree and interaction settings

mod functions;
pub mod parameters;

pub use functions::*;
pub use parameters::*;

use egui::Color32;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

/// Polynomial regression over every feature of the incoming dataset
#[derive(Default)]
pub struct PolyFitNodeFactory;

impl NodeFactory for PolyFitNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "PolyFit",
            "PolyFit",
            NodeCategory::math(),
            "Fits a polynomial model to a dataset",
        )
        .with_color(Color32::from_rgb(45, 55, 65))
        .with_inputs(vec![PortDefinition::required("Dataset")])
        .with_outputs(vec![PortDefinition::required("Model")])
        .with_tags(vec!["math", "regression", "polynomial", "fit"])
        .with_parameters(PolyFitParameters::default().to_parameters())
    }
}
