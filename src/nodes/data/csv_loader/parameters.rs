//! CSV loader parameters

use crate::nodes::params::ParamValue;
use crate::nodes::Node;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvLoaderParameters {
    /// Source path, also the key of the table in the application context
    pub path: String,
}

impl CsvLoaderParameters {
    pub fn from_node(node: &Node) -> Self {
        Self {
            path: node
                .parameter("path")
                .and_then(ParamValue::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }

    pub fn to_parameters(&self) -> Vec<(&'static str, ParamValue)> {
        vec![("path", ParamValue::from(self.path.as_str()))]
    }
}
