//! PolyFit evaluation

use log::info;

use super::parameters::PolyFitParameters;
use crate::error::{status_text, EvalError};
use crate::model::FitRequest;
use crate::nodes::execution_engine::Evaluation;
use crate::nodes::interface::NodeData;
use crate::nodes::math::annotate_model;
use crate::nodes::Node;

pub fn process_polyfit(node: &Node, eval: &mut Evaluation<'_>) -> Result<Option<NodeData>, EvalError> {
    let data = match eval.get_input_value(node.id, 0)?.and_then(NodeData::into_dataset) {
        Some(data) => data,
        None => {
            eval.set_status(node.id, "No data connected");
            return Ok(None);
        }
    };
    if data.is_empty() {
        eval.set_status(node.id, "Empty data");
        return Ok(None);
    }

    let params = PolyFitParameters::from_node(node);
    let request = FitRequest::new(&data.x, &data.y, params.fit_spec());
    match eval.context().fitter().fit(&request) {
        Ok(model) => {
            let model = annotate_model(model, &data);
            let r2 = model.info.r2.unwrap_or(f64::NAN);
            info!("PolyFit node {}: degree {} fit, R²={:.4}", node.id, params.degree, r2);
            eval.set_status(node.id, format!("✓ R²={:.4}", r2));
            Ok(Some(NodeData::Model(model)))
        }
        Err(err) => {
            eval.set_status(node.id, status_text(&err));
            Ok(None)
        }
    }
}
