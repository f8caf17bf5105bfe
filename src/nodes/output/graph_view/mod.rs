//! Graph view node: scatter of the data with the fitted curve on top

mod functions;

pub use functions::*;

use egui::Color32;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

#[derive(Default)]
pub struct GraphViewNodeFactory;

impl NodeFactory for GraphViewNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Graph View",
            "Graph View",
            NodeCategory::output(),
            "Plots a model's curve against its training data",
        )
        .with_color(Color32::from_rgb(60, 45, 60))
        .with_inputs(vec![
            PortDefinition::required("Model"),
            PortDefinition::optional("Dataset"),
        ])
        .with_tags(vec!["output", "plot", "chart", "preview"])
    }
}
