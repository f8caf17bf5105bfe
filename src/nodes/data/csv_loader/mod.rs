//! CSV loader node
//!
//! - mod.rs: node metadata and factory implementation
//! - functions.rs: evaluation logic
//! - parameters.rs: typed parameter record

mod functions;
pub mod parameters;

pub use functions::*;
pub use parameters::*;

use egui::Color32;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

/// Source node exposing a table loaded into the application context
#[derive(Default)]
pub struct CsvLoaderNodeFactory;

impl NodeFactory for CsvLoaderNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "CSV Loader",
            "CSV Loader",
            NodeCategory::data(),
            "Loads a CSV file as a table",
        )
        .with_color(Color32::from_rgb(45, 65, 55))
        .with_outputs(vec![PortDefinition::required("Table")])
        .with_tags(vec!["data", "csv", "source", "file"])
        .with_parameters(CsvLoaderParameters::default().to_parameters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    #[test]
    fn test_csv_loader_metadata() {
        let metadata = CsvLoaderNodeFactory::metadata();
        assert_eq!(metadata.node_type, "CSV Loader");
        assert!(metadata.inputs.is_empty());
        assert_eq!(metadata.outputs.len(), 1);
    }

    #[test]
    fn test_csv_loader_creation() {
        let node = CsvLoaderNodeFactory::create(Pos2::new(10.0, 10.0));
        assert_eq!(node.title, "CSV Loader");
        assert_eq!(node.outputs[0].name, "Table");
        assert_eq!(node.parameter("path").and_then(|p| p.as_str()), Some(""));
    }
}
