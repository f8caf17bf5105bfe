//! Values exchanged between nodes during evaluation

use crate::model::{Dataset, Model, Table};

/// Data flowing out of a node's output socket
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Table(Table),
    Dataset(Dataset),
    Model(Model),
    Scalar(f64),
    Text(String),
    Plot(PlotData),
}

impl NodeData {
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeData::Table(_) => "Table",
            NodeData::Dataset(_) => "Dataset",
            NodeData::Model(_) => "Model",
            NodeData::Scalar(_) => "Scalar",
            NodeData::Text(_) => "Text",
            NodeData::Plot(_) => "Plot",
        }
    }

    pub fn into_table(self) -> Option<Table> {
        match self {
            NodeData::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn into_dataset(self) -> Option<Dataset> {
        match self {
            NodeData::Dataset(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_model(self) -> Option<Model> {
        match self {
            NodeData::Model(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            NodeData::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

/// Series for a scatter-plus-fit chart; drawing is left to the UI
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotData {
    pub scatter: Vec<[f64; 2]>,
    pub curve: Vec<[f64; 2]>,
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let data = NodeData::Model(Model::manual(vec![1.0], 0.0));
        assert_eq!(data.type_name(), "Model");
        assert!(data.clone().into_dataset().is_none());
        assert!(data.into_model().is_some());
        assert_eq!(NodeData::Text("x".into()).as_text(), Some("x"));
        assert_eq!(NodeData::Scalar(2.0).as_scalar(), Some(2.0));
    }
}
