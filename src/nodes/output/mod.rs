//! Output nodes for generated code, reports and previews

pub mod code_generator;
pub mod inspector;
pub mod live_tester;
pub mod graph_view;

pub use code_generator::CodeGeneratorNodeFactory;
pub use inspector::InspectorNodeFactory;
pub use live_tester::LiveTesterNodeFactory;
pub use graph_view::GraphViewNodeFactory;
