//! Range filter parameters

use crate::nodes::params::ParamValue;
use crate::nodes::Node;

#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilterParameters {
    pub start_percent: f64,
    pub end_percent: f64,
}

impl Default for RangeFilterParameters {
    fn default() -> Self {
        Self {
            start_percent: 0.0,
            end_percent: 100.0,
        }
    }
}

impl RangeFilterParameters {
    pub fn from_node(node: &Node) -> Self {
        let defaults = Self::default();
        let percent = |key: &str, fallback: f64| {
            node.parameter(key)
                .and_then(ParamValue::as_f64)
                .unwrap_or(fallback)
                .clamp(0.0, 100.0)
        };
        Self {
            start_percent: percent("start_percent", defaults.start_percent),
            end_percent: percent("end_percent", defaults.end_percent),
        }
    }

    pub fn to_parameters(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("start_percent", ParamValue::from(self.start_percent)),
            ("end_percent", ParamValue::from(self.end_percent)),
        ]
    }

    /// Row bounds `[start, end)` for a dataset of `len` rows
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let at = |percent: f64| (len as f64 * percent / 100.0).floor() as usize;
        (at(self.start_percent), at(self.end_percent))
    }
}
