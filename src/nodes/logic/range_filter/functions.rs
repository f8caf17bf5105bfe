//! Range filter evaluation

use super::parameters::RangeFilterParameters;
use crate::error::EvalError;
use crate::model::Dataset;
use crate::nodes::execution_engine::Evaluation;
use crate::nodes::interface::NodeData;
use crate::nodes::Node;

pub fn process_range_filter(node: &Node, eval: &mut Evaluation<'_>) -> Result<Option<NodeData>, EvalError> {
    let data = match eval.get_input_value(node.id, 0)?.and_then(NodeData::into_dataset) {
        Some(data) => data,
        None => {
            eval.set_status(node.id, "No data connected");
            return Ok(None);
        }
    };

    let filtered = filter_range(&data, &RangeFilterParameters::from_node(node));
    eval.set_status(node.id, format!("✓ {} of {} rows", filtered.len(), data.len()));
    Ok(Some(NodeData::Dataset(filtered)))
}

pub fn filter_range(data: &Dataset, params: &RangeFilterParameters) -> Dataset {
    let (start, end) = params.bounds(data.len());
    data.slice(start, end)
}
