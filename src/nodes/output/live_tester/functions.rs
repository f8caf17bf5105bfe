//! Live tester evaluation

use super::parameters::LiveTesterParameters;
use crate::constants::codegen::SUB_MODEL_COLUMN;
use crate::error::{status_text, EvalError, FitError};
use crate::model::Model;
use crate::nodes::execution_engine::Evaluation;
use crate::nodes::interface::NodeData;
use crate::nodes::Node;

pub fn process_live_tester(node: &Node, eval: &mut Evaluation<'_>) -> Result<Option<NodeData>, EvalError> {
    let model = match eval.get_input_value(node.id, 0)?.and_then(NodeData::into_model) {
        Some(model) => model,
        None => {
            eval.set_status(node.id, "No model connected");
            return Ok(None);
        }
    };

    let params = LiveTesterParameters::from_node(node);
    match predict_with_inputs(&model, &params) {
        Ok(y) => {
            eval.set_status(node.id, format!("Y = {:.6}", y));
            Ok(Some(NodeData::Scalar(y)))
        }
        Err(err) => {
            eval.set_status(node.id, status_text(&err));
            Ok(None)
        }
    }
}

/// Every original input the user has to supply
pub fn tester_input_names(model: &Model) -> Vec<String> {
    if !model.info.all_input_names.is_empty() {
        return model.info.all_input_names.clone();
    }
    direct_names(model)
}

/// Predict from named values, computing `_poly_pred` through the chained sub-model
pub fn predict_with_inputs(model: &Model, params: &LiveTesterParameters) -> Result<f64, FitError> {
    predict_named(model, &direct_names(model), params)
}

fn predict_named(model: &Model, names: &[String], params: &LiveTesterParameters) -> Result<f64, FitError> {
    let row = names
        .iter()
        .map(|name| match &model.info.sub_model {
            Some(sub) if name == SUB_MODEL_COLUMN => {
                let sub_names = if model.info.sub_model_input_names.len() == sub.n_features() {
                    model.info.sub_model_input_names.clone()
                } else {
                    direct_names(sub)
                };
                predict_named(sub, &sub_names, params)
            }
            _ => Ok(params.value(name)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    model.predict_row(&row)
}

/// Names of the columns the model reads directly, `X1..Xn` when unrecorded
fn direct_names(model: &Model) -> Vec<String> {
    let n = model.n_features();
    if model.info.input_feature_names.len() == n && n > 0 {
        model.info.input_feature_names.clone()
    } else {
        (1..=n).map(|i| format!("X{}", i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::terms::power_matrix;
    use crate::model::{ModelInfo, Polynomial};
    use std::collections::BTreeMap;

    fn inputs(pairs: &[(&str, f64)]) -> LiveTesterParameters {
        LiveTesterParameters {
            inputs: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_unnamed_model_uses_numbered_inputs() {
        let model = Model::manual(vec![2.0], 1.0);
        assert_eq!(tester_input_names(&model), vec!["X1"]);
        assert_eq!(predict_with_inputs(&model, &inputs(&[("X1", 4.0)])), Ok(9.0));
        // Missing values read as zero
        assert_eq!(predict_with_inputs(&model, &inputs(&[])), Ok(1.0));
    }

    #[test]
    fn test_chained_sub_model_prediction() {
        // sub: 3 * a
        let sub = Model::polynomial(
            Polynomial::univariate(0.0, vec![3.0]),
            ModelInfo {
                input_feature_names: vec!["a".into()],
                ..ModelInfo::default()
            },
        );
        // outer: 1 + b + 2 * _poly_pred
        let outer = Model::polynomial(
            Polynomial::new(1.0, vec![1.0, 2.0], power_matrix(2, 1, false), 2, 1),
            ModelInfo {
                input_feature_names: vec!["b".into(), "_poly_pred".into()],
                all_input_names: vec!["b".into(), "a".into()],
                sub_model: Some(Box::new(sub)),
                sub_model_input_names: vec!["a".into()],
                ..ModelInfo::default()
            },
        );

        assert_eq!(tester_input_names(&outer), vec!["b", "a"]);
        let y = predict_with_inputs(&outer, &inputs(&[("a", 2.0), ("b", 5.0)])).unwrap();
        assert_eq!(y, 1.0 + 5.0 + 2.0 * 6.0);
    }
}
