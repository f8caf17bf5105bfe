//! Inspector node: reports fit statistics of a connected model

mod functions;

pub use functions::*;

use egui::Color32;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

#[derive(Default)]
pub struct InspectorNodeFactory;

impl NodeFactory for InspectorNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Inspector",
            "Inspector",
            NodeCategory::output(),
            "Shows R², MSE, degree and term count of a model",
        )
        .with_color(Color32::from_rgb(50, 50, 65))
        .with_inputs(vec![PortDefinition::required("Model")])
        .with_tags(vec!["output", "metrics", "debug"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspector_metadata() {
        let metadata = InspectorNodeFactory::metadata();
        assert_eq!(metadata.inputs.len(), 1);
        assert!(metadata.outputs.is_empty());
        assert!(metadata.parameters.is_empty());
    }
}
