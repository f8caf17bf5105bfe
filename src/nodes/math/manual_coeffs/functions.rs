//! Manual coefficients evaluation

use super::parameters::ManualCoeffsParameters;
use crate::error::{status_text, EvalError};
use crate::model::Model;
use crate::nodes::execution_engine::Evaluation;
use crate::nodes::interface::NodeData;
use crate::nodes::Node;

pub fn process_manual_coeffs(node: &Node, eval: &mut Evaluation<'_>) -> Result<Option<NodeData>, EvalError> {
    let params = ManualCoeffsParameters::from_node(node);
    match params.parse_coefficients() {
        Ok(coeffs) => {
            eval.set_status(node.id, format!("✓ Degree {}", coeffs.len()));
            Ok(Some(NodeData::Model(Model::manual(coeffs, params.intercept))))
        }
        Err(err) => {
            eval.set_status(node.id, status_text(&err));
            Ok(None)
        }
    }
}
