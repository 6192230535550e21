//! Input tree nodes handed over by the resolver, and the graph nodes built from them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, NodeResolution};

/// One node of an already resolved dependency tree or graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    pub artifact: Artifact,
    /// Only meaningful for tree-mode resolvers; graph-mode nodes are all included.
    #[serde(default)]
    pub resolution: NodeResolution,
    /// The winning coordinate for nodes omitted for conflict or duplicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_artifact: Option<Artifact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DependencyNode>,
}

impl DependencyNode {
    pub fn new(artifact: Artifact) -> Self {
        Self {
            artifact,
            resolution: NodeResolution::Included,
            related_artifact: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<DependencyNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_resolution(mut self, resolution: NodeResolution, related: Option<Artifact>) -> Self {
        self.resolution = resolution;
        self.related_artifact = related;
        self
    }
}

/// A project (module) whose dependencies are graphed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub artifact: Artifact,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<Project>,
}

impl Project {
    pub fn new(artifact: Artifact) -> Self {
        Self {
            artifact,
            modules: Vec::new(),
        }
    }

    pub fn with_modules(mut self, modules: Vec<Project>) -> Self {
        self.modules = modules;
        self
    }

    /// All modules below this project, depth first, excluding the project itself.
    pub fn collected_projects(&self) -> Vec<&Project> {
        let mut out = Vec::new();
        let mut stack: Vec<&Project> = self.modules.iter().rev().collect();
        while let Some(project) = stack.pop() {
            out.push(project);
            stack.extend(project.modules.iter().rev());
        }
        out
    }
}

/// The unit of the output graph.
///
/// Identity is decided by the rendered node name, not by this struct's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    artifact: Artifact,
    resolution: NodeResolution,
    related_artifact: Option<Artifact>,
    scopes: BTreeSet<String>,
}

impl GraphNode {
    pub fn new(artifact: Artifact) -> Self {
        let mut scopes = BTreeSet::new();
        if !artifact.scope().is_empty() {
            scopes.insert(artifact.scope().to_string());
        }
        Self {
            artifact,
            resolution: NodeResolution::Included,
            related_artifact: None,
            scopes,
        }
    }

    pub fn with_resolution(mut self, resolution: NodeResolution, related: Option<Artifact>) -> Self {
        self.resolution = resolution;
        self.related_artifact = related;
        self
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn resolution(&self) -> NodeResolution {
        self.resolution
    }

    pub fn related_artifact(&self) -> Option<&Artifact> {
        self.related_artifact.as_ref()
    }

    /// Every scope this node was seen with, merged across duplicate visits.
    pub fn scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }

    /// Fold a later occurrence into this (first-stored) node.
    ///
    /// Only the scope set grows; coordinate and classification stay as first seen.
    pub fn merge(&mut self, other: &GraphNode) {
        self.scopes.extend(other.scopes.iter().cloned());
    }
}

impl From<&DependencyNode> for GraphNode {
    fn from(node: &DependencyNode) -> Self {
        GraphNode::new(node.artifact.clone())
            .with_resolution(node.resolution, node.related_artifact.clone())
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.artifact.fmt(f)
    }
}
