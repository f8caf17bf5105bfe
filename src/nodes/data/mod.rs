//! Data nodes for file input and dataset assembly

pub mod csv_loader;
pub mod column_selector;

pub use csv_loader::CsvLoaderNodeFactory;
pub use column_selector::ColumnSelectorNodeFactory;
