//! Column selector parameters

use crate::nodes::params::ParamValue;
use crate::nodes::Node;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSelectorParameters {
    pub features: Vec<String>,
    /// Empty selects the last column of the table
    pub target: String,
}

impl ColumnSelectorParameters {
    pub fn from_node(node: &Node) -> Self {
        Self {
            features: node
                .parameter("features")
                .and_then(ParamValue::as_list)
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
            target: node
                .parameter("target")
                .and_then(ParamValue::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }

    pub fn to_parameters(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("features", ParamValue::from(self.features.clone())),
            ("target", ParamValue::from(self.target.as_str())),
        ]
    }
}
