//! Values flowing between nodes: tables, datasets and fitted models

pub mod condition;
pub mod dataset;
pub mod fitting;
pub mod neural;
pub mod table;
pub mod terms;

pub use condition::{ComparisonOp, Condition};
pub use dataset::Dataset;
pub use fitting::{FitRequest, FitSpec, LeastSquaresFitter, ModelFitter};
pub use neural::{Activation, DenseLayer, NeuralNetwork, Solver};
pub use table::Table;
pub use terms::PowerMatrix;

use crate::error::FitError;

/// Intercept plus one coefficient per power-matrix row
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    pub intercept: f64,
    pub coeffs: Vec<f64>,
    pub powers: PowerMatrix,
    pub n_features: usize,
    pub degree: u32,
}

impl Polynomial {
    pub fn new(intercept: f64, coeffs: Vec<f64>, powers: PowerMatrix, n_features: usize, degree: u32) -> Self {
        Self { intercept, coeffs, powers, n_features, degree }
    }

    /// `intercept + c0·x + c1·x² + ...`
    pub fn univariate(intercept: f64, coeffs: Vec<f64>) -> Self {
        let degree = coeffs.len() as u32;
        let powers = terms::univariate_powers(coeffs.len());
        Self::new(intercept, coeffs, powers, 1, degree)
    }

    pub fn predict_row(&self, row: &[f64]) -> Result<f64, FitError> {
        if row.len() != self.n_features {
            return Err(FitError::DimensionMismatch {
                expected: self.n_features,
                found: row.len(),
            });
        }
        let terms = terms::expand_row(row, &self.powers);
        Ok(self.intercept + terms.iter().zip(&self.coeffs).map(|(t, c)| t * c).sum::<f64>())
    }
}

/// The closed set of model variants a node can produce
#[derive(Debug, Clone, PartialEq)]
pub enum ModelKind {
    LinearPolynomial(Polynomial),
    MultivariatePolynomial(Polynomial),
    NeuralNetwork(NeuralNetwork),
    ManualCoefficients(Polynomial),
}

/// Optional annotations attached by the node that produced a model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelInfo {
    pub r2: Option<f64>,
    pub mse: Option<f64>,
    /// Columns the model consumes directly, possibly including the sub-model column
    pub input_feature_names: Vec<String>,
    /// Original inputs with any chained sub-model expanded to its own inputs
    pub all_input_names: Vec<String>,
    pub sub_model: Option<Box<Model>>,
    pub sub_model_input_names: Vec<String>,
    pub condition: Option<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub kind: ModelKind,
    pub info: ModelInfo,
}

impl Model {
    /// Wrap a fitted polynomial, picking the linear or multivariate variant by input count
    pub fn polynomial(poly: Polynomial, info: ModelInfo) -> Self {
        let kind = if poly.n_features == 1 {
            ModelKind::LinearPolynomial(poly)
        } else {
            ModelKind::MultivariatePolynomial(poly)
        };
        Self { kind, info }
    }

    pub fn manual(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            kind: ModelKind::ManualCoefficients(Polynomial::univariate(intercept, coefficients)),
            info: ModelInfo::default(),
        }
    }

    pub fn neural(network: NeuralNetwork, info: ModelInfo) -> Self {
        Self {
            kind: ModelKind::NeuralNetwork(network),
            info,
        }
    }

    pub fn with_info(mut self, info: ModelInfo) -> Self {
        self.info = info;
        self
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ModelKind::LinearPolynomial(_) => "Linear Polynomial",
            ModelKind::MultivariatePolynomial(_) => "Multivariate Polynomial",
            ModelKind::NeuralNetwork(_) => "Neural Network",
            ModelKind::ManualCoefficients(_) => "Manual Coefficients",
        }
    }

    /// Coefficient view for code generation; `None` for networks
    pub fn polynomial_terms(&self) -> Option<&Polynomial> {
        match &self.kind {
            ModelKind::LinearPolynomial(p)
            | ModelKind::MultivariatePolynomial(p)
            | ModelKind::ManualCoefficients(p) => Some(p),
            ModelKind::NeuralNetwork(_) => None,
        }
    }

    pub fn network(&self) -> Option<&NeuralNetwork> {
        match &self.kind {
            ModelKind::NeuralNetwork(net) => Some(net),
            _ => None,
        }
    }

    pub fn n_features(&self) -> usize {
        match &self.kind {
            ModelKind::NeuralNetwork(net) => net.n_inputs(),
            _ => self.polynomial_terms().map(|p| p.n_features).unwrap_or(0),
        }
    }

    pub fn degree(&self) -> Option<u32> {
        self.polynomial_terms().map(|p| p.degree)
    }

    pub fn term_count(&self) -> Option<usize> {
        self.polynomial_terms().map(|p| p.coeffs.len())
    }

    /// Names of the columns the model reads, in model input order.
    ///
    /// Falls back to `x` for manual coefficients and `x1..xn` otherwise when
    /// the producer recorded no names.
    pub fn feature_names(&self) -> Vec<String> {
        let n = self.n_features();
        if !self.info.input_feature_names.is_empty() && self.info.input_feature_names.len() == n {
            return self.info.input_feature_names.clone();
        }
        match self.kind {
            ModelKind::ManualCoefficients(_) => vec!["x".to_string()],
            _ if n == 0 => vec!["x".to_string()],
            _ => (1..=n).map(|i| format!("x{}", i)).collect(),
        }
    }

    /// The full original input surface a caller must supply
    pub fn input_names(&self) -> Vec<String> {
        if !self.info.all_input_names.is_empty() {
            self.info.all_input_names.clone()
        } else {
            self.feature_names()
        }
    }

    pub fn predict_row(&self, row: &[f64]) -> Result<f64, FitError> {
        match &self.kind {
            ModelKind::NeuralNetwork(net) => net.predict_row(row),
            ModelKind::LinearPolynomial(p)
            | ModelKind::MultivariatePolynomial(p)
            | ModelKind::ManualCoefficients(p) => p.predict_row(row),
        }
    }

    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, FitError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}
