//! Node parameter values

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single persisted parameter. Serialized without a tag so documents hold plain JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    TextList(Vec<String>),
    Numbers(BTreeMap<String, f64>),
}

impl ParamValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(i) => Some(*i),
            ParamValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Integer(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::TextList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_numbers(&self) -> Option<&BTreeMap<String, f64>> {
        match self {
            ParamValue::Numbers(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::TextList(value)
    }
}

impl From<BTreeMap<String, f64>> for ParamValue {
    fn from(value: BTreeMap<String, f64>) -> Self {
        ParamValue::Numbers(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_json() {
        let values: Vec<ParamValue> =
            serde_json::from_str(r#"[true, 3, 2.5, "relu", ["a", "b"], {"x": 1.5}]"#).unwrap();
        assert_eq!(values[0], ParamValue::Boolean(true));
        assert_eq!(values[1], ParamValue::Integer(3));
        assert_eq!(values[2], ParamValue::Float(2.5));
        assert_eq!(values[3].as_str(), Some("relu"));
        assert_eq!(values[4].as_list().map(|l| l.len()), Some(2));
        assert_eq!(values[5].as_numbers().and_then(|m| m.get("x")).copied(), Some(1.5));

        assert_eq!(serde_json::to_string(&ParamValue::Integer(3)).unwrap(), "3");
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(ParamValue::Integer(4).as_f64(), Some(4.0));
        assert_eq!(ParamValue::Float(4.0).as_i64(), Some(4));
        assert_eq!(ParamValue::Float(4.5).as_i64(), None);
        assert_eq!(ParamValue::Text("4".into()).as_f64(), None);
    }
}
