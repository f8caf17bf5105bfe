//! Range filter node: keeps a percentage window of rows

mod functions;
pub mod parameters;

pub use functions::*;
pub use parameters::*;

use egui::Color32;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

#[derive(Default)]
pub struct RangeFilterNodeFactory;

impl NodeFactory for RangeFilterNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Range Filter",
            "Range Filter",
            NodeCategory::logic(),
            "Keeps the rows between two percentages of the dataset",
        )
        .with_color(Color32::from_rgb(60, 55, 50))
        .with_inputs(vec![PortDefinition::required("Dataset")])
        .with_outputs(vec![PortDefinition::required("Dataset")])
        .with_tags(vec!["logic", "filter", "range", "slice"])
        .with_parameters(RangeFilterParameters::default().to_parameters())
    }
}
