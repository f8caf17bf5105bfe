//! Language-neutral arithmetic expression tree

use std::collections::BTreeMap;

use log::warn;

use super::Language;
use crate::constants::codegen::LITERAL_PRECISION;
use crate::model::ComparisonOp;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Real literal, printed at fixed precision
    Const(f64),
    /// Integer literal, printed as-is
    Integer(i64),
    Var(String),
    Pow(Box<Expr>, u32),
    /// Terms joined with `+`
    Sum(Vec<Expr>),
    /// Factors joined with `*`
    Product(Vec<Expr>),
    /// Parenthesised sub-expression
    Group(Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn group(inner: Expr) -> Self {
        Expr::Group(Box::new(inner))
    }

    pub fn pow(base: Expr, exponent: u32) -> Self {
        Expr::Pow(Box::new(base), exponent)
    }

    pub fn render(&self, lang: Language) -> String {
        match self {
            Expr::Const(v) if !v.is_finite() => {
                warn!("non-finite literal {} rendered as 0", v);
                format!("{:.*}", LITERAL_PRECISION, 0.0)
            }
            Expr::Const(v) => format!("{:.*}", LITERAL_PRECISION, v),
            Expr::Integer(v) => v.to_string(),
            Expr::Var(name) => name.clone(),
            Expr::Pow(base, exponent) => lang.power(&base.render(lang), *exponent),
            Expr::Sum(terms) => join(terms, " + ", lang),
            Expr::Product(factors) => join(factors, " * ", lang),
            Expr::Group(inner) => format!("({})", inner.render(lang)),
        }
    }

    /// Numeric value with variables bound from `bindings`; `None` if one is unbound
    pub fn eval(&self, bindings: &BTreeMap<String, f64>) -> Option<f64> {
        match self {
            Expr::Const(v) => Some(*v),
            Expr::Integer(v) => Some(*v as f64),
            Expr::Var(name) => bindings.get(name).copied(),
            Expr::Pow(base, exponent) => Some(base.eval(bindings)?.powi(*exponent as i32)),
            Expr::Sum(terms) => terms.iter().map(|t| t.eval(bindings)).sum(),
            Expr::Product(factors) => factors.iter().map(|f| f.eval(bindings)).product(),
            Expr::Group(inner) => inner.eval(bindings),
        }
    }

    pub fn uses_pow(&self) -> bool {
        match self {
            Expr::Pow(..) => true,
            Expr::Sum(items) | Expr::Product(items) => items.iter().any(Expr::uses_pow),
            Expr::Group(inner) => inner.uses_pow(),
            Expr::Const(_) | Expr::Integer(_) | Expr::Var(_) => false,
        }
    }
}

fn join(items: &[Expr], separator: &str, lang: Language) -> String {
    items
        .iter()
        .map(|item| item.render(lang))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Guard for one branch of a conditional model
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub lhs: Expr,
    pub op: ComparisonOp,
    pub rhs: f64,
    pub negated: bool,
}

impl Predicate {
    pub fn render(&self, lang: Language) -> String {
        let comparison = format!(
            "{} {} {}",
            self.lhs.render(lang),
            self.op.symbol(),
            Expr::Const(self.rhs).render(lang)
        );
        if self.negated {
            lang.not(&comparison)
        } else {
            comparison
        }
    }

    pub fn eval(&self, bindings: &BTreeMap<String, f64>) -> Option<bool> {
        let holds = self.op.apply(self.lhs.eval(bindings)?, self.rhs);
        Some(holds != self.negated)
    }

    pub fn uses_pow(&self) -> bool {
        self.lhs.uses_pow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_render_product_and_power() {
        let expr = Expr::Sum(vec![
            Expr::Const(1.0),
            Expr::group(Expr::Product(vec![Expr::Const(-2.5), Expr::pow(Expr::var("x"), 2)])),
        ]);
        assert_eq!(expr.render(Language::Python), "1.000000 + (-2.500000 * x**2)");
        assert_eq!(expr.render(Language::C), "1.000000 + (-2.500000 * pow(x, 2))");
        assert!(expr.uses_pow());
        assert_eq!(expr.eval(&bindings(&[("x", 2.0)])), Some(-9.0));
        assert_eq!(expr.eval(&bindings(&[("y", 2.0)])), None);
    }

    #[test]
    fn test_non_finite_literals_render_as_zero() {
        let expr = Expr::Sum(vec![Expr::Const(f64::NAN), Expr::Const(f64::NEG_INFINITY)]);
        for lang in [Language::Python, Language::C, Language::Java] {
            assert_eq!(expr.render(lang), "0.000000 + 0.000000");
        }
    }

    #[test]
    fn test_integer_literal() {
        assert_eq!(Expr::Integer(0).render(Language::Java), "0");
        assert!(!Expr::Integer(0).uses_pow());
    }

    #[test]
    fn test_predicate_rendering() {
        let pred = Predicate {
            lhs: Expr::var("speed"),
            op: ComparisonOp::GreaterEqual,
            rhs: 3.0,
            negated: false,
        };
        assert_eq!(pred.render(Language::Python), "speed >= 3.000000");
        let negated = Predicate { negated: true, ..pred };
        assert_eq!(negated.render(Language::Python), "not (speed >= 3.000000)");
        assert_eq!(negated.render(Language::C), "!(speed >= 3.000000)");
        assert_eq!(negated.eval(&bindings(&[("speed", 1.0)])), Some(true));
    }
}
