//! Branch conditions produced by conditional splits

use std::fmt;

/// Column comparison operators offered by the splitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    Equal,
    NotEqual,
}

impl ComparisonOp {
    pub const ALL: [ComparisonOp; 6] = [
        ComparisonOp::Greater,
        ComparisonOp::Less,
        ComparisonOp::GreaterEqual,
        ComparisonOp::LessEqual,
        ComparisonOp::Equal,
        ComparisonOp::NotEqual,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Greater => ">",
            ComparisonOp::Less => "<",
            ComparisonOp::GreaterEqual => ">=",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::Equal => "==",
            ComparisonOp::NotEqual => "!=",
        }
    }

    pub fn parse(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol.trim())
    }

    pub fn apply(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            ComparisonOp::Greater => lhs > rhs,
            ComparisonOp::Less => lhs < rhs,
            ComparisonOp::GreaterEqual => lhs >= rhs,
            ComparisonOp::LessEqual => lhs <= rhs,
            ComparisonOp::Equal => lhs == rhs,
            ComparisonOp::NotEqual => lhs != rhs,
        }
    }
}

/// `column op threshold`, optionally negated for the false branch
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: ComparisonOp,
    pub threshold: f64,
    pub negated: bool,
}

impl Condition {
    pub fn new(column: impl Into<String>, op: ComparisonOp, threshold: f64) -> Self {
        Self {
            column: column.into(),
            op,
            threshold,
            negated: false,
        }
    }

    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Whether a row with this column value belongs to the branch
    pub fn matches(&self, value: f64) -> bool {
        self.op.apply(value, self.threshold) != self.negated
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "NOT ({} {} {})", self.column, self.op.symbol(), self.threshold)
        } else {
            write!(f, "{} {} {}", self.column, self.op.symbol(), self.threshold)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_display() {
        let cond = Condition::new("col", ComparisonOp::Greater, 3.0);
        assert_eq!(cond.to_string(), "col > 3");
        assert_eq!(cond.clone().negate().to_string(), "NOT (col > 3)");
        assert_eq!(
            Condition::new("speed", ComparisonOp::LessEqual, 2.5).to_string(),
            "speed <= 2.5"
        );
    }

    #[test]
    fn test_condition_matches() {
        let cond = Condition::new("col", ComparisonOp::Greater, 3.0);
        assert!(cond.matches(4.0));
        assert!(!cond.matches(3.0));
        let not = cond.negate();
        assert!(not.matches(3.0));
        assert!(!not.matches(4.0));
    }

    #[test]
    fn test_parse_operator() {
        for op in ComparisonOp::ALL {
            assert_eq!(ComparisonOp::parse(op.symbol()), Some(op));
        }
        assert_eq!(ComparisonOp::parse("=>"), None);
    }
}
