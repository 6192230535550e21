//! Dependency reports produced by an external resolver.
//!
//! A report names the project (with its modules) and holds one resolved tree
//! per project, keyed by `groupId:artifactId`:
//!
//! ```json
//! {
//!   "project": {"artifact": {"groupId": "g", "artifactId": "app", "version": "1.0"}},
//!   "trees": {"g:app": {"artifact": {...}, "children": [...]}}
//! }
//! ```
//!
//! Trees are verbose: nodes the resolver omitted keep their `resolution` and
//! `relatedArtifact`. Graph mode prunes them, tree mode hands them out as-is.

use std::fs;
use std::path::Path;

use depgraph_core::{
    Artifact, ArtifactFilter, DependencyGraphResolver, DependencyNode, DependencyTreeResolver,
    DynError, Project,
};
use depgraph_error::{Error, ErrorKind, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyReport {
    pub project: Project,
    #[serde(default)]
    pub trees: IndexMap<String, DependencyNode>,
}

fn tree_key(artifact: &Artifact) -> String {
    format!("{}:{}", artifact.group_id(), artifact.artifact_id())
}

impl DependencyReport {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::file_not_found(path.display().to_string())
                .with_operation("report::load"));
        }
        let content = fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("report::load")
                .with_context("path", path.display().to_string())
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::new(ErrorKind::DeserializationFailed, "malformed dependency report")
                .with_operation("report::load")
                .with_context("path", path.display().to_string())
                .set_source(e)
        })
    }

    fn tree(&self, project: &Project) -> std::result::Result<&DependencyNode, DynError> {
        let key = tree_key(&project.artifact);
        self.trees
            .get(&key)
            .ok_or_else(|| format!("no resolved dependencies for '{key}'").into())
    }
}

/// Drop omitted and filtered nodes together with their subtrees.
fn prune(node: &DependencyNode, filter: &dyn ArtifactFilter) -> DependencyNode {
    let children = node
        .children
        .iter()
        .filter(|child| !child.resolution.is_omitted() && filter.include(&child.artifact))
        .map(|child| prune(child, filter))
        .collect();
    DependencyNode::new(node.artifact.clone()).with_children(children)
}

impl DependencyGraphResolver for DependencyReport {
    fn build_dependency_graph(
        &self,
        project: &Project,
        filter: &dyn ArtifactFilter,
    ) -> std::result::Result<DependencyNode, DynError> {
        debug!(project = %project.artifact, "pruning report tree into a graph");
        Ok(prune(self.tree(project)?, filter))
    }
}

impl DependencyTreeResolver for DependencyReport {
    fn build_dependency_tree(
        &self,
        project: &Project,
        _filter: &dyn ArtifactFilter,
    ) -> std::result::Result<DependencyNode, DynError> {
        self.tree(project).cloned()
    }
}
