//! Target language families

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Python,
    C,
    Java,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Python, Language::C, Language::Java];

    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::C => "C",
            Language::Java => "Java",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Render `base` raised to an integer power
    pub fn power(&self, base: &str, exponent: u32) -> String {
        match self {
            Language::Python => format!("{}**{}", base, exponent),
            Language::C => format!("pow({}, {})", base, exponent),
            Language::Java => format!("Math.pow({}, {})", base, exponent),
        }
    }

    /// Negate a rendered boolean expression
    pub fn not(&self, predicate: &str) -> String {
        match self {
            Language::Python => format!("not ({})", predicate),
            Language::C | Language::Java => format!("!({})", predicate),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_syntax() {
        assert_eq!(Language::Python.power("x", 2), "x**2");
        assert_eq!(Language::C.power("x", 3), "pow(x, 3)");
        assert_eq!(Language::Java.power("x", 2), "Math.pow(x, 2)");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Language::parse("java"), Some(Language::Java));
        assert_eq!(Language::parse("C"), Some(Language::C));
        assert_eq!(Language::parse("Rust"), None);
        assert_eq!(Language::default(), Language::Python);
    }
}
