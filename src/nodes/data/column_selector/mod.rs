//! Column selector node
//!
//! Assembles a training dataset from a table, optionally chaining a
//! previously fitted model in as an extra derived column.

mod functions;
pub mod parameters;

pub use functions::*;
pub use parameters::*;

use egui::Color32;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

#[derive(Default)]
pub struct ColumnSelectorNodeFactory;

impl NodeFactory for ColumnSelectorNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Column Selector",
            "Column Selector",
            NodeCategory::data(),
            "Picks feature and target columns, optionally adding a chained model's prediction",
        )
        .with_color(Color32::from_rgb(45, 60, 70))
        .with_inputs(vec![
            PortDefinition::required("Table"),
            PortDefinition::optional("Sub-model"),
        ])
        .with_outputs(vec![PortDefinition::required("Dataset")])
        .with_tags(vec!["data", "columns", "features", "chain"])
        .with_parameters(ColumnSelectorParameters::default().to_parameters())
    }
}
