//! Conditional splitter evaluation

use super::parameters::SplitterParameters;
use crate::error::EvalError;
use crate::model::{Condition, Dataset};
use crate::nodes::execution_engine::Evaluation;
use crate::nodes::interface::NodeData;
use crate::nodes::Node;

/// Output socket carrying the matching rows
pub const TRUE_BRANCH: usize = 0;

/// Evaluate one branch; `output_index` is the socket the caller pulls through
pub fn process_splitter(
    node: &Node,
    eval: &mut Evaluation<'_>,
    output_index: usize,
) -> Result<Option<NodeData>, EvalError> {
    let data = match eval.get_input_value(node.id, 0)?.and_then(NodeData::into_dataset) {
        Some(data) => data,
        None => {
            eval.set_status(node.id, "No data connected");
            return Ok(None);
        }
    };
    let params = SplitterParameters::from_node(node);
    let condition = match params.condition() {
        Some(condition) => condition,
        None => {
            eval.set_status(node.id, format!("Unknown operator: {}", params.operator));
            return Ok(None);
        }
    };

    let condition = if output_index == TRUE_BRANCH {
        condition
    } else {
        condition.negate()
    };
    let label = condition.to_string();
    match split_branch(&data, condition) {
        Some(branch) => {
            eval.set_status(node.id, format!("✓ {}: {} rows", label, branch.len()));
            Ok(Some(NodeData::Dataset(branch)))
        }
        None => {
            eval.set_status(node.id, format!("Column not in features: {}", params.column));
            Ok(None)
        }
    }
}

/// Rows matching `condition`, tagged with it. `None` when the column is not a feature.
pub fn split_branch(data: &Dataset, condition: Condition) -> Option<Dataset> {
    let index = data.feature_index(&condition.column)?;
    let mut branch = data.filter_rows(|row| condition.matches(data.x[row][index]));
    branch.condition = Some(condition);
    Some(branch)
}
