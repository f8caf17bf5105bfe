//! Conditional splitter node
//!
//! One input, two outputs: output 0 carries the rows matching the predicate,
//! output 1 the rest. Each output is its own evaluation.

mod functions;
pub mod parameters;

pub use functions::*;
pub use parameters::*;

use egui::Color32;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

#[derive(Default)]
pub struct SplitterNodeFactory;

impl NodeFactory for SplitterNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Conditional Splitter",
            "Conditional Splitter",
            NodeCategory::logic(),
            "Partitions a dataset by comparing one column against a threshold",
        )
        .with_color(Color32::from_rgb(65, 55, 45))
        .with_inputs(vec![PortDefinition::required("Dataset")])
        .with_outputs(vec![
            PortDefinition::required("True"),
            PortDefinition::required("False"),
        ])
        .with_tags(vec!["logic", "split", "condition", "branch"])
        .with_parameters(SplitterParameters::default().to_parameters())
    }
}
