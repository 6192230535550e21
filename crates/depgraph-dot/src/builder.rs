use depgraph_core::{GraphBuilder, GraphConfig, GraphStore};
use tracing::debug;

use crate::dot::DotWriter;

/// Graph builder producing Graphviz DOT.
///
/// ```text
/// digraph "name" {
///   node [..]
///   edge [..]
///
///   // Node Definitions:
///   "a"[label=..]
///
///   // Edge Definitions:
///   "a" -> "b"[..]
/// }
/// ```
pub struct DotBuilder {
    store: GraphStore,
}

impl DotBuilder {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::new())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            store: GraphStore::new(config),
        }
    }
}

impl Default for DotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder for DotBuilder {
    fn store(&self) -> &GraphStore {
        &self.store
    }

    fn store_mut(&mut self) -> &mut GraphStore {
        &mut self.store
    }

    fn render(&self) -> String {
        let store = &self.store;
        debug!(
            nodes = store.node_count(),
            edges = store.edge_count(),
            "rendering dot graph"
        );

        let mut writer = DotWriter::new(store.graph_name());
        writer
            .defaults("node", store.default_node_attributes())
            .defaults("edge", store.default_edge_attributes())
            .blank()
            .comment("Node Definitions:");
        for (name, node) in store.nodes() {
            writer.node(name, &store.node_attributes(name, node));
        }

        writer.blank().comment("Edge Definitions:");
        for (edge, attributes) in store.edges() {
            writer.edge(&edge.from, &edge.to, attributes);
        }
        writer.build()
    }
}
