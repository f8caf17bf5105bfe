//! Manual coefficients node: a hand-entered univariate polynomial

mod functions;
pub mod parameters;

pub use functions::*;
pub use parameters::*;

use egui::Color32;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

#[derive(Default)]
pub struct ManualCoeffsNodeFactory;

impl NodeFactory for ManualCoeffsNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "Manual Coeffs",
            "Manual Coeffs",
            NodeCategory::math(),
            "Builds a polynomial model from typed coefficients",
        )
        .with_color(Color32::from_rgb(50, 55, 60))
        .with_outputs(vec![PortDefinition::required("Model")])
        .with_tags(vec!["math", "polynomial", "manual", "source"])
        .with_parameters(ManualCoeffsParameters::default().to_parameters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    #[test]
    fn test_manual_coeffs_creation() {
        let node = ManualCoeffsNodeFactory::create(Pos2::ZERO);
        assert!(node.inputs.is_empty());
        assert_eq!(node.outputs.len(), 1);
        assert_eq!(
            node.parameter("coefficients").and_then(|p| p.as_str()),
            Some("1.0, 0.5, 0.1")
        );
    }
}
