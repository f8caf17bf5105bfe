//! Fitting collaborators
//!
//! The graph engine treats fitting as a black box: a node hands a
//! [`FitRequest`] to a [`ModelFitter`] and either gets a model back or a
//! [`FitError`] that it turns into status text.

use log::debug;

use super::neural::{Activation, Solver};
use super::terms;
use super::{Model, ModelInfo, Polynomial};
use crate::error::FitError;

/// What kind of model the caller wants
#[derive(Debug, Clone, PartialEq)]
pub enum FitSpec {
    Polynomial {
        degree: u32,
        include_interactions: bool,
    },
    NeuralNetwork {
        hidden_layers: Vec<usize>,
        activation: Activation,
        solver: Solver,
        max_iter: u32,
    },
}

/// Training data plus the requested model
#[derive(Debug, Clone)]
pub struct FitRequest<'a> {
    pub x: &'a [Vec<f64>],
    pub y: &'a [f64],
    pub spec: FitSpec,
}

impl<'a> FitRequest<'a> {
    pub fn new(x: &'a [Vec<f64>], y: &'a [f64], spec: FitSpec) -> Self {
        Self { x, y, spec }
    }

    /// Reject empty, ragged or non-finite input before any fitter sees it
    pub fn validate(&self) -> Result<usize, FitError> {
        if self.x.is_empty() || self.y.is_empty() {
            return Err(FitError::EmptyData);
        }
        if self.x.len() != self.y.len() {
            return Err(FitError::DimensionMismatch {
                expected: self.x.len(),
                found: self.y.len(),
            });
        }
        let n_features = self.x[0].len();
        if let Some(row) = self.x.iter().find(|row| row.len() != n_features) {
            return Err(FitError::DimensionMismatch {
                expected: n_features,
                found: row.len(),
            });
        }
        let finite = self.x.iter().flatten().chain(self.y).all(|v| v.is_finite());
        if !finite {
            return Err(FitError::NonFinite);
        }
        Ok(n_features)
    }
}

/// Capability contract for anything that can fit a model
pub trait ModelFitter {
    fn name(&self) -> &str;

    fn fit(&self, request: &FitRequest<'_>) -> Result<Model, FitError>;
}

/// Ordinary least squares over polynomial terms.
///
/// Rank-deficient designs get the minimum-norm solution instead of an error.
#[derive(Debug, Clone, Default)]
pub struct LeastSquaresFitter;

impl LeastSquaresFitter {
    pub fn new() -> Self {
        Self
    }
}

impl ModelFitter for LeastSquaresFitter {
    fn name(&self) -> &str {
        "least-squares"
    }

    fn fit(&self, request: &FitRequest<'_>) -> Result<Model, FitError> {
        let (degree, include_interactions) = match request.spec {
            FitSpec::Polynomial { degree, include_interactions } => (degree, include_interactions),
            FitSpec::NeuralNetwork { .. } => {
                return Err(FitError::Unavailable("No trainer available".into()));
            }
        };
        let n_features = request.validate()?;
        if n_features == 0 {
            return Err(FitError::EmptyData);
        }

        let powers = terms::power_matrix(n_features, degree, !include_interactions);
        let design = terms::expand(request.x, &powers);
        let (intercept, coeffs) = solve_least_squares(&design, request.y)?;

        let poly = Polynomial::new(intercept, coeffs, powers, n_features, degree);
        let predicted = request
            .x
            .iter()
            .map(|row| poly.predict_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        let (r2, mse) = score(request.y, &predicted);
        debug!("least squares fit: {} terms, r2={:.4}", poly.coeffs.len(), r2);

        Ok(Model::polynomial(
            poly,
            ModelInfo {
                r2: Some(r2),
                mse: Some(mse),
                ..ModelInfo::default()
            },
        ))
    }
}

/// Solve for `(intercept, coefficients)` minimising squared error.
///
/// Columns are centred and scaled to unit norm, then solved through a
/// one-sided Jacobi SVD. Singular values below the `lstsq` cutoff are
/// discarded, which yields the minimum-norm solution.
fn solve_least_squares(design: &[Vec<f64>], y: &[f64]) -> Result<(f64, Vec<f64>), FitError> {
    let m = design.len();
    let p = design.first().map(Vec::len).unwrap_or(0);
    let y_mean = y.iter().sum::<f64>() / m.max(1) as f64;
    let centred_y: Vec<f64> = y.iter().map(|v| v - y_mean).collect();

    let mut means = vec![0.0; p];
    let mut norms = vec![0.0; p];
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(p);
    for j in 0..p {
        means[j] = design.iter().map(|row| row[j]).sum::<f64>() / m as f64;
        let mut column: Vec<f64> = design.iter().map(|row| row[j] - means[j]).collect();
        norms[j] = dot(&column, &column).sqrt();
        if norms[j] > 0.0 {
            column.iter_mut().for_each(|v| *v /= norms[j]);
        }
        columns.push(column);
    }

    let scaled = minimum_norm_solve(columns, &centred_y);

    let coeffs: Vec<f64> = scaled
        .iter()
        .zip(&norms)
        .map(|(z, &norm)| if norm > 0.0 { z / norm } else { 0.0 })
        .collect();
    let intercept = y_mean - coeffs.iter().zip(&means).map(|(c, m)| c * m).sum::<f64>();

    if !intercept.is_finite() || coeffs.iter().any(|c| !c.is_finite()) {
        return Err(FitError::Singular);
    }
    Ok((intercept, coeffs))
}

/// Minimum-norm `z` minimising `|A z - b|` for `A` given column-major
fn minimum_norm_solve(mut w: Vec<Vec<f64>>, b: &[f64]) -> Vec<f64> {
    const MAX_SWEEPS: usize = 60;
    let p = w.len();
    let m = b.len();
    let mut v: Vec<Vec<f64>> = (0..p)
        .map(|j| (0..p).map(|i| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for _ in 0..MAX_SWEEPS {
        let mut rotated = false;
        for j in 0..p {
            for k in j + 1..p {
                let alpha = dot(&w[j], &w[j]);
                let beta = dot(&w[k], &w[k]);
                let gamma = dot(&w[j], &w[k]);
                if gamma == 0.0 || gamma.abs() <= f64::EPSILON * (alpha * beta).sqrt() {
                    continue;
                }
                rotated = true;

                let zeta = (beta - alpha) / (2.0 * gamma);
                let sign = if zeta >= 0.0 { 1.0 } else { -1.0 };
                let t = sign / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;
                rotate(&mut w, j, k, c, s);
                rotate(&mut v, j, k, c, s);
            }
        }
        if !rotated {
            break;
        }
    }

    let sigma: Vec<f64> = w.iter().map(|col| dot(col, col).sqrt()).collect();
    let sigma_max = sigma.iter().copied().fold(0.0, f64::max);
    let cutoff = sigma_max * m.max(p) as f64 * f64::EPSILON;

    let mut z = vec![0.0; p];
    for (j, &s) in sigma.iter().enumerate() {
        if s <= cutoff || s == 0.0 {
            debug!("dropping singular value {:e} below cutoff {:e}", s, cutoff);
            continue;
        }
        // u_j = w_j / s, so u_j . b / s = w_j . b / s^2
        let weight = dot(&w[j], b) / (s * s);
        for (zi, vi) in z.iter_mut().zip(&v[j]) {
            *zi += weight * vi;
        }
    }
    z
}

/// Givens rotation of columns `j` and `k`
fn rotate(columns: &mut [Vec<f64>], j: usize, k: usize, c: f64, s: f64) {
    for i in 0..columns[j].len() {
        let a = columns[j][i];
        let b = columns[k][i];
        columns[j][i] = c * a - s * b;
        columns[k][i] = s * a + c * b;
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Coefficient of determination and mean squared error
pub fn score(actual: &[f64], predicted: &[f64]) -> (f64, f64) {
    let n = actual.len().max(1) as f64;
    let mean = actual.iter().sum::<f64>() / n;
    let ss_res: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).powi(2)).sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let r2 = if ss_tot == 0.0 {
        if ss_res == 0.0 { 1.0 } else { 0.0 }
    } else {
        1.0 - ss_res / ss_tot
    };
    (r2, ss_res / n)
}
