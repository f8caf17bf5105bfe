//! Conditional splitter parameters

use crate::model::{ComparisonOp, Condition};
use crate::nodes::params::ParamValue;
use crate::nodes::Node;

#[derive(Debug, Clone, PartialEq)]
pub struct SplitterParameters {
    pub column: String,
    /// One of `>`, `<`, `>=`, `<=`, `==`, `!=`
    pub operator: String,
    pub value: f64,
}

impl Default for SplitterParameters {
    fn default() -> Self {
        Self {
            column: String::new(),
            operator: ">".to_string(),
            value: 0.0,
        }
    }
}

impl SplitterParameters {
    pub fn from_node(node: &Node) -> Self {
        let defaults = Self::default();
        Self {
            column: node
                .parameter("column")
                .and_then(ParamValue::as_str)
                .map(str::to_string)
                .unwrap_or(defaults.column),
            operator: node
                .parameter("operator")
                .and_then(ParamValue::as_str)
                .map(str::to_string)
                .unwrap_or(defaults.operator),
            value: node
                .parameter("value")
                .and_then(ParamValue::as_f64)
                .unwrap_or(defaults.value),
        }
    }

    pub fn to_parameters(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("column", ParamValue::from(self.column.as_str())),
            ("operator", ParamValue::from(self.operator.as_str())),
            ("value", ParamValue::from(self.value)),
        ]
    }

    /// The true-branch predicate; `None` for an unknown operator
    pub fn condition(&self) -> Option<Condition> {
        ComparisonOp::parse(&self.operator).map(|op| Condition::new(self.column.clone(), op, self.value))
    }
}
