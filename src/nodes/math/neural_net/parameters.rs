//! Neural network parameters

use crate::constants::node::{MAX_ITERATIONS, MIN_ITERATIONS};
use crate::error::FitError;
use crate::model::neural::parse_hidden_layers;
use crate::model::{Activation, FitSpec, Solver};
use crate::nodes::params::ParamValue;
use crate::nodes::Node;

#[derive(Debug, Clone, PartialEq)]
pub struct NeuralNetParameters {
    /// Comma-separated layer sizes, e.g. `100, 50`
    pub hidden_layers: String,
    pub activation: String,
    pub solver: String,
    pub max_iter: u32,
}

impl Default for NeuralNetParameters {
    fn default() -> Self {
        Self {
            hidden_layers: "100, 50".to_string(),
            activation: Activation::Relu.name().to_string(),
            solver: Solver::Adam.name().to_string(),
            max_iter: 500,
        }
    }
}

impl NeuralNetParameters {
    pub fn from_node(node: &Node) -> Self {
        let defaults = Self::default();
        let text = |key: &str, fallback: String| {
            node.parameter(key)
                .and_then(ParamValue::as_str)
                .map(str::to_string)
                .unwrap_or(fallback)
        };
        Self {
            hidden_layers: text("hidden_layers", defaults.hidden_layers),
            activation: text("activation", defaults.activation),
            solver: text("solver", defaults.solver),
            max_iter: node
                .parameter("max_iter")
                .and_then(ParamValue::as_i64)
                .map(|n| n.clamp(MIN_ITERATIONS as i64, MAX_ITERATIONS as i64) as u32)
                .unwrap_or(defaults.max_iter),
        }
    }

    pub fn to_parameters(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("hidden_layers", ParamValue::from(self.hidden_layers.as_str())),
            ("activation", ParamValue::from(self.activation.as_str())),
            ("solver", ParamValue::from(self.solver.as_str())),
            ("max_iter", ParamValue::from(self.max_iter as i64)),
        ]
    }

    /// Validate the text fields into a training request
    pub fn fit_spec(&self) -> Result<FitSpec, FitError> {
        let hidden_layers = parse_hidden_layers(&self.hidden_layers)?;
        let activation = Activation::parse(&self.activation)
            .ok_or_else(|| FitError::InvalidParameter(format!("activation '{}'", self.activation)))?;
        let solver = Solver::parse(&self.solver)
            .ok_or_else(|| FitError::InvalidParameter(format!("solver '{}'", self.solver)))?;
        Ok(FitSpec::NeuralNetwork {
            hidden_layers,
            activation,
            solver,
            max_iter: self.max_iter,
        })
    }
}
