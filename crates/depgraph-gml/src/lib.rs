//! GML export for dependency graphs.
//!
//! GML carries no styling, so the builder is backed by an attribute-free
//! [`GraphStore`] and every attribute renderer or style is ignored.

use std::fmt::Write;

use depgraph_core::{GraphBuilder, GraphConfig, GraphStore};
use indexmap::IndexMap;
use tracing::debug;

/// Escape a GML string value.
fn escape(input: &str) -> String {
    input.replace('&', "&amp;").replace('"', "&quot;")
}

/// Graph builder producing GML.
///
/// Nodes are numbered in insertion order; edges reference those ids.
pub struct GmlBuilder {
    store: GraphStore,
}

impl GmlBuilder {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::new())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            store: GraphStore::without_attributes(config),
        }
    }
}

impl Default for GmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder for GmlBuilder {
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
            "rendering gml graph"
        );

        let mut ids: IndexMap<&str, usize> = IndexMap::with_capacity(store.node_count());
        let mut out = String::with_capacity(4096);
        let _ = writeln!(out, "graph [");
        let _ = writeln!(out, "  directed 1");
        let _ = writeln!(out, "  label \"{}\"", escape(store.graph_name()));

        for (id, (name, _)) in store.nodes().enumerate() {
            ids.insert(name, id);
            let _ = writeln!(out, "  node [");
            let _ = writeln!(out, "    id {id}");
            let _ = writeln!(out, "    label \"{}\"", escape(name));
            let _ = writeln!(out, "  ]");
        }

        for (edge, _) in store.edges() {
            let (Some(source), Some(target)) = (ids.get(edge.from.as_str()), ids.get(edge.to.as_str()))
            else {
                continue;
            };
            let _ = writeln!(out, "  edge [");
            let _ = writeln!(out, "    source {source}");
            let _ = writeln!(out, "    target {target}");
            let _ = writeln!(out, "  ]");
        }

        out.push_str("]\n");
        out
    }
}
