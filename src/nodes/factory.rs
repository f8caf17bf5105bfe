//! Node factory system with self-registration and rich metadata

use std::collections::{BTreeMap, HashMap};

use egui::{Color32, Pos2};
use log::warn;

use crate::nodes::params::ParamValue;
use crate::nodes::{Node, NodeGraph, NodeId};

/// Hierarchical category system for organizing nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeCategory {
    path: Vec<String>,
}

impl NodeCategory {
    /// Create a new category from path components
    pub fn new(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Get the category name (last component)
    pub fn name(&self) -> &str {
        self.path.last().map(|s| s.as_str()).unwrap_or("")
    }

    pub fn data() -> Self {
        Self::new(&["Data"])
    }

    pub fn logic() -> Self {
        Self::new(&["Logic"])
    }

    pub fn math() -> Self {
        Self::new(&["Math"])
    }

    pub fn output() -> Self {
        Self::new(&["Output"])
    }
}

/// Socket definition for node creation
#[derive(Debug, Clone)]
pub struct PortDefinition {
    pub name: String,
    pub optional: bool,
}

impl PortDefinition {
    /// Create a required socket
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            optional: false,
        }
    }

    /// Create an optional socket
    pub fn optional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            optional: true,
        }
    }
}

/// Metadata for a node type, the single source for its sockets and defaults
#[derive(Debug, Clone)]
pub struct NodeMetadata {
    pub node_type: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub color: Color32,
    pub category: NodeCategory,
    pub tags: Vec<&'static str>,
    pub inputs: Vec<PortDefinition>,
    pub outputs: Vec<PortDefinition>,
    /// Default parameter values written into every new node
    pub parameters: Vec<(&'static str, ParamValue)>,
}

impl NodeMetadata {
    pub fn new(
        node_type: &'static str,
        display_name: &'static str,
        category: NodeCategory,
        description: &'static str,
    ) -> Self {
        Self {
            node_type,
            display_name,
            description,
            color: Color32::from_rgb(100, 100, 100),
            category,
            tags: vec![],
            inputs: vec![],
            outputs: vec![],
            parameters: vec![],
        }
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<PortDefinition>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PortDefinition>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_tags(mut self, tags: Vec<&'static str>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<(&'static str, ParamValue)>) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Node factory trait with rich metadata
pub trait NodeFactory {
    /// Get comprehensive node metadata
    fn metadata() -> NodeMetadata
    where
        Self: Sized;

    /// Create a node instance at the given position
    fn create(position: Pos2) -> Node
    where
        Self: Sized,
    {
        let meta = Self::metadata();
        let mut node = Node::new(0, meta.node_type, position).with_color(meta.color);
        node.title = meta.display_name.to_string();

        for input in &meta.inputs {
            node.add_input(&input.name);
        }
        for output in &meta.outputs {
            node.add_output(&output.name);
        }
        for (name, value) in meta.parameters {
            node.set_parameter(name, value);
        }
        node
    }

    /// Add this node to a graph
    fn add_to_graph(graph: &mut NodeGraph, position: Pos2) -> NodeId
    where
        Self: Sized,
    {
        graph.add_node(Self::create(position))
    }
}

/// Function pointer type for creating nodes
type NodeCreator = fn(Pos2) -> Node;
type MetadataProvider = fn() -> NodeMetadata;

/// Registry mapping stable type tags to node constructors
pub struct NodeRegistry {
    creators: BTreeMap<String, NodeCreator>,
    metadata_providers: BTreeMap<String, MetadataProvider>,
    categories: HashMap<NodeCategory, Vec<String>>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            creators: BTreeMap::new(),
            metadata_providers: BTreeMap::new(),
            categories: HashMap::new(),
        }
    }

    /// Registry holding the full node catalog
    pub fn with_defaults() -> Self {
        use crate::nodes::{data, logic, math, output};

        let mut registry = Self::new();
        registry.register::<data::CsvLoaderNodeFactory>();
        registry.register::<data::ColumnSelectorNodeFactory>();
        registry.register::<logic::SplitterNodeFactory>();
        registry.register::<logic::RangeFilterNodeFactory>();
        registry.register::<math::PolyFitNodeFactory>();
        registry.register::<math::NeuralNetNodeFactory>();
        registry.register::<math::ManualCoeffsNodeFactory>();
        registry.register::<output::CodeGeneratorNodeFactory>();
        registry.register::<output::InspectorNodeFactory>();
        registry.register::<output::LiveTesterNodeFactory>();
        registry.register::<output::GraphViewNodeFactory>();
        registry
    }

    /// Register a node factory
    pub fn register<T: NodeFactory + 'static>(&mut self) {
        let metadata = T::metadata();
        let node_type = metadata.node_type.to_string();

        if self.creators.insert(node_type.clone(), T::create).is_some() {
            warn!("Node type {} registered twice; keeping the latest", node_type);
        }
        self.metadata_providers.insert(node_type.clone(), T::metadata);

        let entry = self.categories.entry(metadata.category.clone()).or_default();
        if !entry.contains(&node_type) {
            entry.push(node_type);
        }
    }

    /// Create a node by type name
    pub fn create_node(&self, node_type: &str, position: Pos2) -> Option<Node> {
        self.creators.get(node_type).map(|creator| creator(position))
    }

    /// Get metadata for a node type without creating the node
    pub fn get_node_metadata(&self, node_type: &str) -> Option<NodeMetadata> {
        self.metadata_providers.get(node_type).map(|provider| provider())
    }

    /// All registered tags in sorted order
    pub fn node_types(&self) -> Vec<&str> {
        self.creators.keys().map(String::as_str).collect()
    }

    /// Registered tags grouped by category, for menus
    pub fn categories(&self) -> Vec<(&NodeCategory, &[String])> {
        let mut grouped: Vec<_> = self
            .categories
            .iter()
            .map(|(category, types)| (category, types.as_slice()))
            .collect();
        grouped.sort_by(|a, b| a.0.cmp(b.0));
        grouped
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
