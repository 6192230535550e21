//! Format-agnostic graph accumulation.
//!
//! [`GraphStore`] owns the node map (rendered name -> first stored node) and the
//! edge set, both in insertion order. Exporters wrap a store and implement
//! [`GraphBuilder`] by supplying only the text grammar in [`GraphBuilder::render`].

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::debug;

use crate::attribute::AttributeBuilder;
use crate::node::GraphNode;
use crate::render::{EdgeAttributeRenderer, NodeAttributeRenderer, NodeNameRenderer, NodeNames};

const DEFAULT_GRAPH_NAME: &str = "G";

/// Ordered pair of rendered node names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

impl GraphEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Renderers and switches of one graph builder.
pub struct GraphConfig {
    graph_name: String,
    node_names: Box<dyn NodeNameRenderer>,
    node_attributes: Option<Box<dyn NodeAttributeRenderer>>,
    edge_attributes: Option<Box<dyn EdgeAttributeRenderer>>,
    node_style: AttributeBuilder,
    edge_style: AttributeBuilder,
    omit_self_references: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
            node_names: Box::new(NodeNames::Full),
            node_attributes: None,
            edge_attributes: None,
            node_style: AttributeBuilder::new(),
            edge_style: AttributeBuilder::new(),
            omit_self_references: false,
        }
    }
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }

    pub fn with_node_names(mut self, renderer: impl NodeNameRenderer + 'static) -> Self {
        self.node_names = Box::new(renderer);
        self
    }

    pub fn with_omit_self_references(mut self, omit: bool) -> Self {
        self.omit_self_references = omit;
        self
    }
}

/// Nodes and edges collected during one traversal pass.
pub struct GraphStore {
    config: GraphConfig,
    /// Formats without an attribute model ignore every attribute renderer.
    attributes_enabled: bool,
    nodes: IndexMap<String, GraphNode>,
    edges: IndexMap<GraphEdge, AttributeBuilder>,
}

impl GraphStore {
    /// Store for formats that carry node/edge attributes.
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            attributes_enabled: true,
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }

    /// Store for formats without attributes.
    pub fn without_attributes(config: GraphConfig) -> Self {
        Self {
            attributes_enabled: false,
            ..Self::new(config)
        }
    }

    pub fn graph_name(&self) -> &str {
        &self.config.graph_name
    }

    pub fn node_name(&self, node: &GraphNode) -> String {
        self.config.node_names.create_node_name(node)
    }

    /// Register a node under its rendered name. The first node stored under a
    /// name stays; later occurrences only merge their scopes into it.
    fn add_node(&mut self, node: &GraphNode) -> String {
        let name = self.node_name(node);
        match self.nodes.entry(name.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().merge(node),
            Entry::Vacant(entry) => {
                entry.insert(node.clone());
            }
        }
        name
    }

    /// Register both endpoints and the edge between them.
    ///
    /// No-op when an endpoint is missing. Returns whether a new edge was recorded.
    pub fn insert_edge(
        &mut self,
        from: Option<&GraphNode>,
        to: Option<&GraphNode>,
        renderer: Option<&dyn EdgeAttributeRenderer>,
    ) -> bool {
        let (Some(from), Some(to)) = (from, to) else {
            return false;
        };

        let from_name = self.add_node(from);
        let to_name = self.add_node(to);

        if self.config.omit_self_references && from_name == to_name {
            debug!(node = %from_name, "omitting self reference");
            return false;
        }

        let edge = GraphEdge::new(from_name, to_name);
        if self.edges.contains_key(&edge) {
            return false;
        }

        let renderer: Option<&dyn EdgeAttributeRenderer> = match renderer {
            Some(explicit) => Some(explicit),
            None => self.config.edge_attributes.as_deref(),
        };
        let attributes = match renderer {
            Some(renderer) if self.attributes_enabled => renderer.create_edge_attributes(from, to),
            _ => AttributeBuilder::new(),
        };
        self.edges.insert(edge, attributes);
        true
    }

    /// The node first stored under the same rendered name, or `node` itself.
    pub fn effective_node<'a>(&'a self, node: &'a GraphNode) -> &'a GraphNode {
        let name = self.node_name(node);
        self.nodes.get(&name).unwrap_or(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &GraphNode)> {
        self.nodes.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn edges(&self) -> impl Iterator<Item = (&GraphEdge, &AttributeBuilder)> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Attributes of a stored node; a plain name label without a renderer.
    pub fn node_attributes(&self, name: &str, node: &GraphNode) -> AttributeBuilder {
        match &self.config.node_attributes {
            Some(renderer) if self.attributes_enabled => renderer.create_node_attributes(node),
            _ => AttributeBuilder::new().label(name),
        }
    }

    pub fn default_node_attributes(&self) -> &AttributeBuilder {
        &self.config.node_style
    }

    pub fn default_edge_attributes(&self) -> &AttributeBuilder {
        &self.config.edge_style
    }

    fn accepts_attributes(&self, what: &str) -> bool {
        if !self.attributes_enabled {
            debug!(what, "format has no attribute model, ignoring");
        }
        self.attributes_enabled
    }
}

/// The graph builder contract shared by every export format.
///
/// Renderer hooks must be configured before the first edge is added, because
/// the node name renderer defines the keys of the node map.
pub trait GraphBuilder {
    fn store(&self) -> &GraphStore;

    fn store_mut(&mut self) -> &mut GraphStore;

    /// Serialise nodes, then edges, in insertion order.
    fn render(&self) -> String;

    fn add_edge(&mut self, from: Option<&GraphNode>, to: Option<&GraphNode>) {
        self.store_mut().insert_edge(from, to, None);
    }

    fn add_edge_with(
        &mut self,
        from: Option<&GraphNode>,
        to: Option<&GraphNode>,
        renderer: &dyn EdgeAttributeRenderer,
    ) {
        self.store_mut().insert_edge(from, to, Some(renderer));
    }

    fn effective_node<'a>(&'a self, node: &'a GraphNode) -> &'a GraphNode {
        self.store().effective_node(node)
    }

    fn graph_name(&mut self, name: &str) {
        self.store_mut().config.graph_name = name.to_string();
    }

    fn omit_self_references(&mut self) {
        self.store_mut().config.omit_self_references = true;
    }

    fn use_node_name_renderer(&mut self, renderer: Box<dyn NodeNameRenderer>) {
        self.store_mut().config.node_names = renderer;
    }

    fn use_node_attribute_renderer(&mut self, renderer: Box<dyn NodeAttributeRenderer>) {
        let store = self.store_mut();
        if store.accepts_attributes("node attribute renderer") {
            store.config.node_attributes = Some(renderer);
        }
    }

    fn use_edge_attribute_renderer(&mut self, renderer: Box<dyn EdgeAttributeRenderer>) {
        let store = self.store_mut();
        if store.accepts_attributes("edge attribute renderer") {
            store.config.edge_attributes = Some(renderer);
        }
    }

    fn node_style(&mut self, attributes: AttributeBuilder) {
        let store = self.store_mut();
        if store.accepts_attributes("node style") {
            store.config.node_style = attributes;
        }
    }

    fn edge_style(&mut self, attributes: AttributeBuilder) {
        let store = self.store_mut();
        if store.accepts_attributes("edge style") {
            store.config.edge_style = attributes;
        }
    }
}
