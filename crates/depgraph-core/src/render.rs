//! Renderer seams: node names, node attributes and edge attributes.
//!
//! The node name doubles as the deduplication key of the graph store, so the
//! chosen [`NodeNames`] variant decides the shape of the graph.

use strum_macros::{Display, EnumString};

use crate::artifact::join_coordinates;
use crate::attribute::AttributeBuilder;
use crate::node::GraphNode;

pub trait NodeNameRenderer {
    fn create_node_name(&self, node: &GraphNode) -> String;
}

pub trait NodeAttributeRenderer {
    fn create_node_attributes(&self, node: &GraphNode) -> AttributeBuilder;
}

pub trait EdgeAttributeRenderer {
    fn create_edge_attributes(&self, from: &GraphNode, to: &GraphNode) -> AttributeBuilder;
}

impl<F> NodeNameRenderer for F
where
    F: Fn(&GraphNode) -> String,
{
    fn create_node_name(&self, node: &GraphNode) -> String {
        self(node)
    }
}

impl<F> NodeAttributeRenderer for F
where
    F: Fn(&GraphNode) -> AttributeBuilder,
{
    fn create_node_attributes(&self, node: &GraphNode) -> AttributeBuilder {
        self(node)
    }
}

impl<F> EdgeAttributeRenderer for F
where
    F: Fn(&GraphNode, &GraphNode) -> AttributeBuilder,
{
    fn create_edge_attributes(&self, from: &GraphNode, to: &GraphNode) -> AttributeBuilder {
        self(from, to)
    }
}

/// Built-in node name strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum NodeNames {
    /// `group:artifact:type[:classifier]:version[:scope]`
    #[default]
    Full,
    /// `group:artifact:type[:classifier]`, all versions and scopes share a node.
    VersionlessId,
    /// `group:artifact:type[:classifier][:scope]`
    VersionlessIdWithScope,
    /// `group[:scope]`
    GroupIdWithScope,
}

impl NodeNameRenderer for NodeNames {
    fn create_node_name(&self, node: &GraphNode) -> String {
        let a = node.artifact();
        match self {
            NodeNames::Full => a.to_string(),
            NodeNames::VersionlessId => join_coordinates(&[
                a.group_id(),
                a.artifact_id(),
                a.artifact_type(),
                a.classifier(),
            ]),
            NodeNames::VersionlessIdWithScope => join_coordinates(&[
                a.group_id(),
                a.artifact_id(),
                a.artifact_type(),
                a.classifier(),
                a.scope(),
            ]),
            NodeNames::GroupIdWithScope => join_coordinates(&[a.group_id(), a.scope()]),
        }
    }
}
