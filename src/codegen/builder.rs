//! Expression Builder: fitted models to expression trees

use log::{debug, warn};

use super::expr::{Expr, Predicate};
use super::identifiers::safe_identifier;
use crate::constants::codegen::{COEFF_EPSILON, LOCAL_PREFIX, SUB_MODEL_COLUMN};
use crate::model::terms::is_univariate_sequence;
use crate::model::{Condition, Model, Polynomial};

/// A chained sub-model prediction bound to a local ahead of the return
#[derive(Debug, Clone, PartialEq)]
pub struct Local {
    pub name: String,
    pub value: Expr,
}

/// Builds expressions in Horner or standard expanded form
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionBuilder {
    pub horner: bool,
}

impl ExpressionBuilder {
    pub fn new(horner: bool) -> Self {
        Self { horner }
    }

    /// Expression computing `model`'s prediction from its original inputs.
    ///
    /// A model without coefficients yields the literal `0`. Chained
    /// sub-models are substituted inline.
    pub fn build(&self, model: &Model) -> Expr {
        self.build_in(model, None)
    }

    /// Like [`build`](Self::build), but each chained sub-model is bound once
    /// in `locals` (innermost first) and referenced by name.
    pub fn build_scoped(&self, model: &Model, locals: &mut Vec<Local>) -> Expr {
        self.build_in(model, Some(locals))
    }

    fn build_in(&self, model: &Model, mut locals: Option<&mut Vec<Local>>) -> Expr {
        let Some(poly) = model.polynomial_terms() else {
            warn!("{} has no coefficients; emitting 0", model.kind_name());
            return Expr::Integer(0);
        };

        let mut vars = Vec::new();
        for name in model.feature_names() {
            vars.push(self.variable(&name, model, locals.as_deref_mut()));
        }

        if self.horner && poly.n_features == 1 && !poly.coeffs.is_empty() {
            if is_univariate_sequence(&poly.powers) {
                return self.horner_form(poly, vars[0].clone());
            }
            debug!("powers are not a consecutive sequence; using expanded form");
        }
        self.standard_form(poly, &vars)
    }

    /// `(i + x * (c0 + x * (c1 + ... x * cn)))`
    fn horner_form(&self, poly: &Polynomial, x: Expr) -> Expr {
        let mut coeffs = poly.coeffs.iter().rev();
        let mut inner = match coeffs.next() {
            Some(&last) => Expr::Const(last),
            None => return Expr::Const(poly.intercept),
        };
        for &c in coeffs {
            inner = Expr::group(Expr::Sum(vec![
                Expr::Const(c),
                Expr::Product(vec![x.clone(), inner]),
            ]));
        }
        Expr::group(Expr::Sum(vec![
            Expr::Const(poly.intercept),
            Expr::Product(vec![x, inner]),
        ]))
    }

    /// `i + (c0 * a) + (c1 * b) + (c2 * a * b) + ...`, skipping near-zero coefficients
    fn standard_form(&self, poly: &Polynomial, vars: &[Expr]) -> Expr {
        let mut terms = vec![Expr::Const(poly.intercept)];

        for (i, &c) in poly.coeffs.iter().enumerate() {
            if c.abs() < COEFF_EPSILON {
                continue;
            }

            let mut factors = Vec::new();
            if let Some(row) = poly.powers.get(i) {
                for (feature, &p) in row.iter().enumerate() {
                    if p == 0 {
                        continue;
                    }
                    let var = vars
                        .get(feature)
                        .cloned()
                        .unwrap_or_else(|| Expr::var(format!("x{}", feature)));
                    factors.push(if p == 1 { var } else { Expr::pow(var, p) });
                }
            }

            if factors.is_empty() {
                terms.push(Expr::Const(c));
            } else {
                factors.insert(0, Expr::Const(c));
                terms.push(Expr::group(Expr::Product(factors)));
            }
        }

        Expr::Sum(terms)
    }

    /// A feature reference; the sub-model column expands into the sub-model itself
    fn variable(&self, name: &str, model: &Model, locals: Option<&mut Vec<Local>>) -> Expr {
        if name == SUB_MODEL_COLUMN {
            match &model.info.sub_model {
                Some(sub) => {
                    return match locals {
                        Some(locals) => {
                            let value = self.build_in(sub, Some(&mut *locals));
                            let name = format!("{}{}", LOCAL_PREFIX, locals.len());
                            locals.push(Local { name: name.clone(), value });
                            Expr::var(name)
                        }
                        None => Expr::group(self.build_in(sub, None)),
                    };
                }
                None => warn!("{} referenced without a chained sub-model", SUB_MODEL_COLUMN),
            }
        }
        Expr::var(safe_identifier(name))
    }

    /// Guard built from a model's branch condition, if it has one
    pub fn predicate(&self, model: &Model) -> Option<Predicate> {
        let Condition { column, op, threshold, negated } = model.info.condition.as_ref()?;
        Some(Predicate {
            lhs: self.variable(column, model, None),
            op: *op,
            rhs: *threshold,
            negated: *negated,
        })
    }
}
