//! Row partitioning nodes

pub mod splitter;
pub mod range_filter;

pub use splitter::SplitterNodeFactory;
pub use range_filter::RangeFilterNodeFactory;
