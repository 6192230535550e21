//! Bridges the external dependency resolvers and graph builders.

use std::collections::BTreeSet;

use depgraph_error::{DynError, Error, Result};
use tracing::{debug, info};

use crate::artifact::NodeResolution;
use crate::filter::ArtifactFilter;
use crate::graph::GraphBuilder;
use crate::node::{DependencyNode, Project};
use crate::visit::{GraphBuildingVisitor, walk};

/// Resolver producing an already conflict-resolved dependency graph.
pub trait DependencyGraphResolver {
    fn build_dependency_graph(
        &self,
        project: &Project,
        filter: &dyn ArtifactFilter,
    ) -> std::result::Result<DependencyNode, DynError>;
}

/// Resolver producing the verbose tree, with omitted nodes kept and classified.
pub trait DependencyTreeResolver {
    fn build_dependency_tree(
        &self,
        project: &Project,
        filter: &dyn ArtifactFilter,
    ) -> std::result::Result<DependencyNode, DynError>;
}

enum ResolverSource<'r> {
    Graph(&'r dyn DependencyGraphResolver),
    Tree(&'r dyn DependencyTreeResolver),
}

/// Resolves a project and feeds the result into a [`GraphBuilder`].
pub struct GraphBuilderAdapter<'r> {
    source: ResolverSource<'r>,
    target_filter: Box<dyn ArtifactFilter + 'r>,
    included_resolutions: BTreeSet<NodeResolution>,
}

impl<'r> GraphBuilderAdapter<'r> {
    /// Graph mode. Every resolution is accepted since nothing is omitted.
    pub fn for_graph(
        resolver: &'r dyn DependencyGraphResolver,
        target_filter: impl ArtifactFilter + 'r,
    ) -> Self {
        Self {
            source: ResolverSource::Graph(resolver),
            target_filter: Box::new(target_filter),
            included_resolutions: NodeResolution::all(),
        }
    }

    /// Tree mode. Only nodes whose resolution is in `included_resolutions` get edges.
    pub fn for_tree(
        resolver: &'r dyn DependencyTreeResolver,
        target_filter: impl ArtifactFilter + 'r,
        included_resolutions: BTreeSet<NodeResolution>,
    ) -> Self {
        Self {
            source: ResolverSource::Tree(resolver),
            target_filter: Box::new(target_filter),
            included_resolutions,
        }
    }

    pub fn build_dependency_graph(
        &self,
        project: &Project,
        global_filter: &dyn ArtifactFilter,
        builder: &mut dyn GraphBuilder,
    ) -> Result<()> {
        let root = self.resolve(project, global_filter).map_err(|err| {
            Error::graph_build_failed(err)
                .with_operation("adapter::build_dependency_graph")
                .with_context("project", project.artifact.to_string())
        })?;
        info!(project = %project.artifact, "resolved dependencies");

        let mut visitor = GraphBuildingVisitor::new(
            builder,
            global_filter,
            self.target_filter.as_ref(),
            self.included_resolutions.clone(),
        );
        walk(&root, &mut visitor);
        Ok(())
    }

    fn resolve(
        &self,
        project: &Project,
        global_filter: &dyn ArtifactFilter,
    ) -> std::result::Result<DependencyNode, DynError> {
        match self.source {
            ResolverSource::Graph(resolver) => {
                debug!(project = %project.artifact, "resolving dependency graph");
                resolver.build_dependency_graph(project, global_filter)
            }
            ResolverSource::Tree(resolver) => {
                debug!(project = %project.artifact, "resolving dependency tree");
                resolver.build_dependency_tree(project, global_filter)
            }
        }
    }
}
