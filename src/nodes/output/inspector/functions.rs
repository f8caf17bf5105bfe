//! Inspector evaluation

use crate::error::EvalError;
use crate::model::Model;
use crate::nodes::execution_engine::Evaluation;
use crate::nodes::interface::NodeData;
use crate::nodes::Node;

pub fn process_inspector(node: &Node, eval: &mut Evaluation<'_>) -> Result<Option<NodeData>, EvalError> {
    match eval.get_input_value(node.id, 0)?.and_then(NodeData::into_model) {
        Some(model) => {
            eval.set_status(node.id, report(&model).join("\n"));
            Ok(Some(NodeData::Model(model)))
        }
        None => {
            eval.set_status(node.id, empty_report().join("\n"));
            Ok(None)
        }
    }
}

/// One line each for R², MSE, degree and term count
pub fn report(model: &Model) -> Vec<String> {
    vec![
        match model.info.r2 {
            Some(r2) => format!("R²: {:.6}", r2),
            None => "R²: N/A".to_string(),
        },
        match model.info.mse {
            Some(mse) => format!("MSE: {:.6}", mse),
            None => "MSE: N/A".to_string(),
        },
        match model.degree() {
            Some(degree) => format!("Degree: {}", degree),
            None => "Degree: --".to_string(),
        },
        match model.term_count() {
            Some(terms) => format!("Terms: {}", terms),
            None => "Terms: --".to_string(),
        },
    ]
}

pub fn empty_report() -> Vec<String> {
    vec![
        "R²: -- (no model)".to_string(),
        "MSE: --".to_string(),
        "Degree: --".to_string(),
        "Connect a PolyFit node".to_string(),
    ]
}
