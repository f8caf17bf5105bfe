//! Live tester parameters

use std::collections::BTreeMap;

use crate::nodes::params::ParamValue;
use crate::nodes::Node;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveTesterParameters {
    /// Values typed for each original input; absent names read as 0.0
    pub inputs: BTreeMap<String, f64>,
}

impl LiveTesterParameters {
    pub fn from_node(node: &Node) -> Self {
        Self {
            inputs: node
                .parameter("inputs")
                .and_then(ParamValue::as_numbers)
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub fn to_parameters(&self) -> Vec<(&'static str, ParamValue)> {
        vec![("inputs", ParamValue::from(self.inputs.clone()))]
    }

    pub fn value(&self, name: &str) -> f64 {
        self.inputs.get(name).copied().unwrap_or(0.0)
    }
}
