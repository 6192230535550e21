//! Dependency graph model and traversal.
//!
//! A resolved [`DependencyNode`] tree is walked by a [`GraphBuildingVisitor`]
//! which feeds a [`GraphBuilder`]. Nodes are identified by their rendered name,
//! so the choice of [`NodeNameRenderer`] decides which occurrences collapse
//! into a single graph node.

pub mod adapter;
pub mod artifact;
pub mod attribute;
pub mod factory;
pub mod filter;
pub mod graph;
pub mod label;
pub mod node;
pub mod render;
pub mod visit;

pub use adapter::{DependencyGraphResolver, DependencyTreeResolver, GraphBuilderAdapter};
pub use artifact::{Artifact, NodeResolution};
pub use attribute::{AttributeBuilder, escape_label};
pub use factory::{AggregatingGraphFactory, GraphFactory, SimpleGraphFactory};
pub use filter::{
    AcceptAll, AndArtifactFilter, ArtifactFilter, ArtifactPattern, ScopeArtifactFilter,
    StrictPatternExcludesArtifactFilter, StrictPatternIncludesArtifactFilter,
};
pub use graph::{GraphBuilder, GraphConfig, GraphEdge, GraphStore};
pub use label::{LabelBuilder, SegmentFont};
pub use node::{DependencyNode, GraphNode, Project};
pub use render::{EdgeAttributeRenderer, NodeAttributeRenderer, NodeNameRenderer, NodeNames};
pub use visit::{DependencyVisitor, GraphBuildingVisitor, VisitDecision, walk};

pub use depgraph_error::{DynError, Error, ErrorKind, Result};
