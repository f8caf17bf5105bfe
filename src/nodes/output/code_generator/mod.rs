//! Code generator node
//!
//! Collects up to four models and renders them as a `predict` function.
//! Two models whose first carries a split condition become an if/else.

mod functions;
pub mod parameters;

pub use functions::*;
pub use parameters::*;

use egui::Color32;
use crate::constants::node::CODE_GENERATOR_INPUTS;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

#[derive(Default)]
pub struct CodeGeneratorNodeFactory;

impl NodeFactory for CodeGeneratorNodeFactory {
    fn metadata() -> NodeMetadata {
        let inputs = (1..=CODE_GENERATOR_INPUTS)
            .map(|i| {
                let name = format!("Model {}", i);
                if i == 1 {
                    PortDefinition::required(&name)
                } else {
                    PortDefinition::optional(&name)
                }
            })
            .collect();

        NodeMetadata::new(
            "Code Generator",
            "Code Generator",
            NodeCategory::output(),
            "Renders connected models as Python, C or Java source",
        )
        .with_color(Color32::from_rgb(65, 50, 45))
        .with_inputs(inputs)
        .with_tags(vec!["output", "codegen", "export", "source"])
        .with_parameters(CodeGeneratorParameters::default().to_parameters())
    }
}
