//! PolyFit parameters

use crate::constants::node::{MAX_DEGREE, MIN_DEGREE};
use crate::model::FitSpec;
use crate::nodes::params::ParamValue;
use crate::nodes::Node;

#[derive(Debug, Clone, PartialEq)]
pub struct PolyFitParameters {
    pub degree: u32,
    /// Off restricts terms to products of distinct features
    pub include_interactions: bool,
}

impl Default for PolyFitParameters {
    fn default() -> Self {
        Self {
            degree: 2,
            include_interactions: true,
        }
    }
}

impl PolyFitParameters {
    pub fn from_node(node: &Node) -> Self {
        let defaults = Self::default();
        let degree = node
            .parameter("degree")
            .and_then(ParamValue::as_i64)
            .map(|d| d.clamp(MIN_DEGREE as i64, MAX_DEGREE as i64) as u32)
            .unwrap_or(defaults.degree);
        Self {
            degree,
            include_interactions: node
                .parameter("include_interactions")
                .and_then(ParamValue::as_bool)
                .unwrap_or(defaults.include_interactions),
        }
    }

    pub fn to_parameters(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("degree", ParamValue::from(self.degree as i64)),
            ("include_interactions", ParamValue::from(self.include_interactions)),
        ]
    }

    pub fn fit_spec(&self) -> FitSpec {
        FitSpec::Polynomial {
            degree: self.degree,
            include_interactions: self.include_interactions,
        }
    }
}
