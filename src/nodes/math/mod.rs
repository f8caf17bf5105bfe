//! Model fitting nodes

pub mod polyfit;
pub mod neural_net;
pub mod manual_coeffs;

pub use polyfit::PolyFitNodeFactory;
pub use neural_net::NeuralNetNodeFactory;
pub use manual_coeffs::ManualCoeffsNodeFactory;

use crate::model::{Dataset, Model};

/// Copy the dataset's provenance onto a freshly fitted model
pub(crate) fn annotate_model(mut model: Model, data: &Dataset) -> Model {
    model.info.input_feature_names = data.feature_names.clone();
    model.info.all_input_names = if data.all_input_names.is_empty() {
        data.feature_names.clone()
    } else {
        data.all_input_names.clone()
    };
    model.info.sub_model = data.sub_model.clone();
    model.info.sub_model_input_names = data.sub_model_input_names.clone();
    model.info.condition = data.condition.clone();
    model
}
