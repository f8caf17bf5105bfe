//! Column selector evaluation

use super::parameters::ColumnSelectorParameters;
use crate::constants::codegen::SUB_MODEL_COLUMN;
use crate::error::{status_text, EvalError};
use crate::model::{Dataset, Model, Table};
use crate::nodes::execution_engine::Evaluation;
use crate::nodes::interface::NodeData;
use crate::nodes::Node;

pub fn process_column_selector(node: &Node, eval: &mut Evaluation<'_>) -> Result<Option<NodeData>, EvalError> {
    let table = match eval.get_input_value(node.id, 0)?.and_then(NodeData::into_table) {
        Some(table) => table,
        None => {
            eval.set_status(node.id, "No data connected");
            return Ok(None);
        }
    };
    let sub_model = eval.get_input_value(node.id, 1)?.and_then(NodeData::into_model);
    let params = ColumnSelectorParameters::from_node(node);

    match assemble_dataset(table, &params, sub_model) {
        Ok(data) => {
            eval.set_status(
                node.id,
                format!("✓ {} features, {} rows", data.feature_names.len(), data.len()),
            );
            Ok(Some(NodeData::Dataset(data)))
        }
        Err(message) => {
            eval.set_status(node.id, message);
            Ok(None)
        }
    }
}

/// Build the dataset for the selected columns.
///
/// With a sub-model connected, its prediction is appended to the table as
/// `_poly_pred` first, so the column can be selected like any other. The
/// sub-model is only recorded on the dataset when that column is used.
pub fn assemble_dataset(
    table: Table,
    params: &ColumnSelectorParameters,
    sub_model: Option<Model>,
) -> Result<Dataset, String> {
    if params.features.is_empty() {
        return Err("No features selected".to_string());
    }
    let target = if params.target.is_empty() {
        table.columns.last().cloned().ok_or("Empty table")?
    } else {
        params.target.clone()
    };

    let uses_sub_model = params.features.iter().any(|f| f == SUB_MODEL_COLUMN);
    let (table, sub_model, sub_model_input_names) = match sub_model {
        Some(model) if uses_sub_model => {
            let inputs = direct_inputs(&table, &model)?;
            let predictions = chained_predictions(&table, &model, &inputs)?;
            (table.with_column(SUB_MODEL_COLUMN, predictions), Some(Box::new(model)), inputs)
        }
        _ => (table, None, Vec::new()),
    };

    let x = table
        .select(&params.features)
        .ok_or_else(|| missing_column(&table, &params.features))?;
    let y = table
        .column(&target)
        .ok_or_else(|| format!("Missing column: {}", target))?;

    let mut all_input_names: Vec<String> = Vec::new();
    for feature in &params.features {
        let expanded = match &sub_model {
            Some(model) if feature == SUB_MODEL_COLUMN => model.input_names(),
            _ => vec![feature.clone()],
        };
        for name in expanded {
            if !all_input_names.contains(&name) {
                all_input_names.push(name);
            }
        }
    }

    Ok(Dataset {
        x,
        y,
        feature_names: params.features.clone(),
        all_input_names,
        target_name: target,
        sub_model,
        sub_model_input_names,
        condition: None,
    })
}

/// Columns a model reads directly: its recorded feature names, or the
/// first `n` table columns when the model carries no names
fn direct_inputs(table: &Table, model: &Model) -> Result<Vec<String>, String> {
    let n = model.n_features();
    let named = &model.info.input_feature_names;
    if n > 0 && named.len() == n {
        return Ok(named.clone());
    }
    if table.columns.len() < n {
        return Err(format!("Sub-model needs {} columns", n));
    }
    Ok(table.columns[..n].to_vec())
}

/// Per-row predictions of `model` reading `inputs` from the table.
///
/// A `_poly_pred` input is itself computed from the model's chained
/// sub-model, so chains of any depth see the same values the generated code
/// and the live tester compute.
fn chained_predictions(table: &Table, model: &Model, inputs: &[String]) -> Result<Vec<f64>, String> {
    let mut columns = Vec::with_capacity(inputs.len());
    for name in inputs {
        let column = match &model.info.sub_model {
            Some(sub) if name == SUB_MODEL_COLUMN => {
                let sub_inputs = if model.info.sub_model_input_names.len() == sub.n_features() {
                    model.info.sub_model_input_names.clone()
                } else {
                    direct_inputs(table, sub)?
                };
                chained_predictions(table, sub, &sub_inputs)?
            }
            _ => table
                .column(name)
                .ok_or_else(|| format!("Missing column: {}", name))?,
        };
        columns.push(column);
    }

    let rows: Vec<Vec<f64>> = (0..table.len())
        .map(|i| columns.iter().map(|column| column[i]).collect())
        .collect();
    model.predict(&rows).map_err(|e| status_text(&e))
}

fn missing_column(table: &Table, features: &[String]) -> String {
    let missing = features
        .iter()
        .find(|f| table.column_index(f).is_none())
        .map(String::as_str)
        .unwrap_or_default();
    format!("Missing column: {}", missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::ExpressionBuilder;
    use crate::model::terms::power_matrix;
    use crate::model::{ModelInfo, Polynomial};

    fn table() -> Table {
        Table::new(
            vec!["a".into(), "b".into(), "y".into()],
            vec![vec![1.0, 10.0, 5.0], vec![2.0, 20.0, 7.0], vec![3.0, 30.0, 9.0]],
        )
    }

    fn params(features: &[&str], target: &str) -> ColumnSelectorParameters {
        ColumnSelectorParameters {
            features: features.iter().map(|f| f.to_string()).collect(),
            target: target.to_string(),
        }
    }

    #[test]
    fn test_default_target_is_last_column() {
        let data = assemble_dataset(table(), &params(&["a", "b"], ""), None).unwrap();
        assert_eq!(data.target_name, "y");
        assert_eq!(data.x[1], vec![2.0, 20.0]);
        assert_eq!(data.y, vec![5.0, 7.0, 9.0]);
        assert_eq!(data.all_input_names, vec!["a", "b"]);
        assert!(data.sub_model.is_none());
    }

    #[test]
    fn test_missing_column_and_no_features() {
        assert_eq!(
            assemble_dataset(table(), &params(&["a", "zz"], ""), None),
            Err("Missing column: zz".to_string())
        );
        assert_eq!(
            assemble_dataset(table(), &params(&[], ""), None),
            Err("No features selected".to_string())
        );
    }

    #[test]
    fn test_sub_model_column_is_appended_and_expanded() {
        // prediction = 2 * a
        let sub = Model::polynomial(
            Polynomial::univariate(0.0, vec![2.0]),
            ModelInfo {
                input_feature_names: vec!["a".into()],
                ..ModelInfo::default()
            },
        );
        let data = assemble_dataset(table(), &params(&["b", "_poly_pred"], "y"), Some(sub)).unwrap();

        assert_eq!(data.feature_names, vec!["b", "_poly_pred"]);
        assert_eq!(data.all_input_names, vec!["b", "a"]);
        assert_eq!(data.sub_model_input_names, vec!["a"]);
        assert_eq!(data.feature("_poly_pred"), Some(vec![2.0, 4.0, 6.0]));
        assert!(data.sub_model.is_some());
    }

    #[test]
    fn test_two_level_chain_matches_generated_expression() {
        // s1 = 2a, s2 = b + s1
        let s1 = Model::polynomial(
            Polynomial::univariate(0.0, vec![2.0]),
            ModelInfo {
                input_feature_names: vec!["a".into()],
                ..ModelInfo::default()
            },
        );
        let s2 = Model::polynomial(
            Polynomial::new(0.0, vec![1.0, 1.0], power_matrix(2, 1, false), 2, 1),
            ModelInfo {
                input_feature_names: vec!["b".into(), "_poly_pred".into()],
                all_input_names: vec!["b".into(), "a".into()],
                sub_model: Some(Box::new(s1)),
                sub_model_input_names: vec!["a".into()],
                ..ModelInfo::default()
            },
        );

        let data = assemble_dataset(table(), &params(&["_poly_pred"], "y"), Some(s2.clone())).unwrap();
        assert_eq!(data.feature("_poly_pred"), Some(vec![12.0, 24.0, 36.0]));
        assert_eq!(data.sub_model_input_names, vec!["b", "_poly_pred"]);
        assert_eq!(data.all_input_names, vec!["b", "a"]);

        let bindings: std::collections::BTreeMap<String, f64> = [("a".to_string(), 1.0), ("b".to_string(), 10.0)].into_iter().collect();
        let expr = ExpressionBuilder::new(false).build(&s2);
        assert_eq!(expr.eval(&bindings), Some(12.0));
    }

    #[test]
    fn test_unnamed_sub_model_reads_leading_columns() {
        let sub = Model::manual(vec![1.0, 1.0], 0.0);
        let data = assemble_dataset(table(), &params(&["_poly_pred"], "y"), Some(sub)).unwrap();
        // a + a^2 on the first column
        assert_eq!(data.feature("_poly_pred"), Some(vec![2.0, 6.0, 12.0]));
        assert_eq!(data.sub_model_input_names, vec!["a"]);
    }

    #[test]
    fn test_named_sub_model_with_missing_column() {
        let sub = Model::polynomial(
            Polynomial::univariate(0.0, vec![1.0]),
            ModelInfo {
                input_feature_names: vec!["rpm".into()],
                ..ModelInfo::default()
            },
        );
        assert_eq!(
            assemble_dataset(table(), &params(&["_poly_pred"], "y"), Some(sub)),
            Err("Missing column: rpm".to_string())
        );
    }

    #[test]
    fn test_sub_model_ignored_when_column_unused() {
        let sub = Model::manual(vec![1.0], 0.0);
        let data = assemble_dataset(table(), &params(&["a"], "y"), Some(sub)).unwrap();
        assert!(data.sub_model.is_none());
        assert!(data.sub_model_input_names.is_empty());
    }
}
