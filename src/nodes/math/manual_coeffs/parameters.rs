//! Manual coefficient parameters

use crate::error::FitError;
use crate::nodes::params::ParamValue;
use crate::nodes::Node;

#[derive(Debug, Clone, PartialEq)]
pub struct ManualCoeffsParameters {
    /// Comma-separated, ascending degree starting at x¹
    pub coefficients: String,
    pub intercept: f64,
}

impl Default for ManualCoeffsParameters {
    fn default() -> Self {
        Self {
            coefficients: "1.0, 0.5, 0.1".to_string(),
            intercept: 0.0,
        }
    }
}

impl ManualCoeffsParameters {
    pub fn from_node(node: &Node) -> Self {
        let defaults = Self::default();
        Self {
            coefficients: node
                .parameter("coefficients")
                .and_then(ParamValue::as_str)
                .map(str::to_string)
                .unwrap_or(defaults.coefficients),
            intercept: node
                .parameter("intercept")
                .and_then(ParamValue::as_f64)
                .unwrap_or(defaults.intercept),
        }
    }

    pub fn to_parameters(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("coefficients", ParamValue::from(self.coefficients.as_str())),
            ("intercept", ParamValue::from(self.intercept)),
        ]
    }

    pub fn parse_coefficients(&self) -> Result<Vec<f64>, FitError> {
        let coeffs = self
            .coefficients
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<f64>()
                    .map_err(|_| FitError::InvalidParameter(format!("coefficient '{}'", s)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if coeffs.is_empty() {
            return Err(FitError::InvalidParameter("no coefficients".into()));
        }
        Ok(coeffs)
    }
}
