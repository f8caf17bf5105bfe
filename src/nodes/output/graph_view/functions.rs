//! Graph view evaluation

use crate::constants::plot::{CURVE_SAMPLES, DEFAULT_RANGE};
use crate::error::EvalError;
use crate::model::{Dataset, Model};
use crate::nodes::execution_engine::Evaluation;
use crate::nodes::interface::{NodeData, PlotData};
use crate::nodes::Node;

pub fn process_graph_view(node: &Node, eval: &mut Evaluation<'_>) -> Result<Option<NodeData>, EvalError> {
    let model = match eval.get_input_value(node.id, 0)?.and_then(NodeData::into_model) {
        Some(model) => model,
        None => {
            eval.set_status(node.id, "No model connected (input 1)");
            return Ok(None);
        }
    };
    let data = eval.get_input_value(node.id, 1)?.and_then(NodeData::into_dataset);

    let plot = build_plot(&model, data.as_ref());
    eval.set_status(node.id, "✓ Graph updated");
    Ok(Some(NodeData::Plot(plot)))
}

/// Scatter of the first feature against the target plus the model curve.
///
/// The curve sweeps the first feature across the data range with every other
/// feature held at zero.
pub fn build_plot(model: &Model, data: Option<&Dataset>) -> PlotData {
    let scatter: Vec<[f64; 2]> = data
        .filter(|d| !d.feature_names.is_empty())
        .map(|d| d.x.iter().zip(&d.y).map(|(row, y)| [row[0], *y]).collect())
        .unwrap_or_default();

    let (lo, hi) = scatter
        .iter()
        .map(|p| p[0])
        .fold(None, |range: Option<(f64, f64)>, x| match range {
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
            None => Some((x, x)),
        })
        .unwrap_or(DEFAULT_RANGE);

    let n = model.n_features().max(1);
    let last = (CURVE_SAMPLES - 1).max(1) as f64;
    let curve = (0..CURVE_SAMPLES)
        .filter_map(|i| {
            let x = lo + (hi - lo) * i as f64 / last;
            let mut row = vec![0.0; n];
            row[0] = x;
            model.predict_row(&row).ok().map(|y| [x, y])
        })
        .collect();

    let x_label = data
        .and_then(|d| d.feature_names.first().cloned())
        .or_else(|| model.feature_names().into_iter().next())
        .unwrap_or_else(|| "x".to_string());
    let y_label = data
        .map(|d| d.target_name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "y".to_string());

    PlotData {
        scatter,
        curve,
        title: model.info.r2.map(|r2| format!("R² = {:.4}", r2)),
        x_label,
        y_label,
    }
}
