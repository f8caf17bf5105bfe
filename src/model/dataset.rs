//! Feature/target datasets assembled from tables

use super::{Condition, Model};

/// Row-major feature matrix with its target vector and provenance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<f64>,
    /// Columns of `x`, in order
    pub feature_names: Vec<String>,
    /// Original inputs with the sub-model column expanded
    pub all_input_names: Vec<String>,
    pub target_name: String,
    pub sub_model: Option<Box<Model>>,
    pub sub_model_input_names: Vec<String>,
    pub condition: Option<Condition>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|f| f == name)
    }

    /// Values of one feature column
    pub fn feature(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.feature_index(name)?;
        Some(self.x.iter().map(|row| row[index]).collect())
    }

    /// Copy with only the rows selected by `keep`, metadata carried over
    pub fn filter_rows(&self, keep: impl Fn(usize) -> bool) -> Dataset {
        let mut out = self.with_rows(Vec::new(), Vec::new());
        for (i, (row, y)) in self.x.iter().zip(&self.y).enumerate() {
            if keep(i) {
                out.x.push(row.clone());
                out.y.push(*y);
            }
        }
        out
    }

    /// Copy holding rows `start..end` (clamped), metadata carried over
    pub fn slice(&self, start: usize, end: usize) -> Dataset {
        let end = end.min(self.len());
        let start = start.min(end);
        self.with_rows(self.x[start..end].to_vec(), self.y[start..end].to_vec())
    }

    fn with_rows(&self, x: Vec<Vec<f64>>, y: Vec<f64>) -> Dataset {
        Dataset {
            x,
            y,
            feature_names: self.feature_names.clone(),
            all_input_names: self.all_input_names.clone(),
            target_name: self.target_name.clone(),
            sub_model: self.sub_model.clone(),
            sub_model_input_names: self.sub_model_input_names.clone(),
            condition: self.condition.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset {
            x: (1..=5).map(|v| vec![v as f64]).collect(),
            y: vec![10.0, 20.0, 30.0, 40.0, 50.0],
            feature_names: vec!["col".into()],
            all_input_names: vec!["col".into()],
            target_name: "y".into(),
            ..Dataset::default()
        }
    }

    #[test]
    fn test_slice_clamps_and_keeps_metadata() {
        let data = sample();
        let part = data.slice(1, 3);
        assert_eq!(part.y, vec![20.0, 30.0]);
        assert_eq!(part.feature_names, data.feature_names);
        assert_eq!(part.target_name, "y");
        assert_eq!(data.slice(4, 99).len(), 1);
        assert!(data.slice(9, 2).is_empty());
    }

    #[test]
    fn test_filter_rows() {
        let data = sample();
        let even = data.filter_rows(|i| i % 2 == 0);
        assert_eq!(even.y, vec![10.0, 30.0, 50.0]);
        assert_eq!(data.feature("col"), Some(vec![1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(data.feature("nope"), None);
    }
}
