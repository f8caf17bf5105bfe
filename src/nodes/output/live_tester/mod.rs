//! Live tester node: evaluates a model on hand-entered inputs

mod functions;
pub mod parameters;

pub use functions::*;
pub use parameters::*;

use egui::Color32;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

#[derive(Default)]
pub struct LiveTesterNodeFactory;

impl NodeFactory for LiveTesterNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Live Tester",
            "Live Tester",
            NodeCategory::output(),
            "Predicts one value from typed inputs, resolving chained models",
        )
        .with_color(Color32::from_rgb(45, 65, 60))
        .with_inputs(vec![PortDefinition::required("Model")])
        .with_tags(vec!["output", "predict", "test"])
        .with_parameters(LiveTesterParameters::default().to_parameters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    #[test]
    fn test_live_tester_creation() {
        let node = LiveTesterNodeFactory::create(Pos2::ZERO);
        assert_eq!(node.inputs.len(), 1);
        assert!(node.outputs.is_empty());
        assert!(node.parameter("inputs").and_then(|p| p.as_numbers()).is_some());
    }
}
