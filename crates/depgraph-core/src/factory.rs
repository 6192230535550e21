//! Factories producing the final graph text for a project.

use depgraph_error::Result;
use tracing::debug;

use crate::adapter::GraphBuilderAdapter;
use crate::attribute::AttributeBuilder;
use crate::filter::ArtifactFilter;
use crate::graph::GraphBuilder;
use crate::node::{GraphNode, Project};

pub trait GraphFactory {
    fn create_graph(&mut self, project: &Project) -> Result<String>;
}

/// One graph for one project, named after its artifact id.
pub struct SimpleGraphFactory<'r> {
    adapter: GraphBuilderAdapter<'r>,
    global_filter: Box<dyn ArtifactFilter + 'r>,
    builder: Box<dyn GraphBuilder>,
}

impl<'r> SimpleGraphFactory<'r> {
    pub fn new(
        adapter: GraphBuilderAdapter<'r>,
        global_filter: impl ArtifactFilter + 'r,
        builder: Box<dyn GraphBuilder>,
    ) -> Self {
        Self {
            adapter,
            global_filter: Box::new(global_filter),
            builder,
        }
    }
}

impl GraphFactory for SimpleGraphFactory<'_> {
    fn create_graph(&mut self, project: &Project) -> Result<String> {
        self.builder.graph_name(project.artifact.artifact_id());
        self.adapter
            .build_dependency_graph(project, self.global_filter.as_ref(), self.builder.as_mut())?;
        Ok(self.builder.render())
    }
}

/// One graph spanning every module of a multi-module project.
pub struct AggregatingGraphFactory<'r> {
    adapter: GraphBuilderAdapter<'r>,
    global_filter: Box<dyn ArtifactFilter + 'r>,
    builder: Box<dyn GraphBuilder>,
    include_parent_projects: bool,
}

impl<'r> AggregatingGraphFactory<'r> {
    pub fn new(
        adapter: GraphBuilderAdapter<'r>,
        global_filter: impl ArtifactFilter + 'r,
        builder: Box<dyn GraphBuilder>,
        include_parent_projects: bool,
    ) -> Self {
        Self {
            adapter,
            global_filter: Box::new(global_filter),
            builder,
            include_parent_projects,
        }
    }

    /// Dotted edges from every aggregator to its modules.
    fn add_module_edges(&mut self, parent: &Project) {
        let dotted = |_: &GraphNode, _: &GraphNode| AttributeBuilder::new().style("dotted");
        for module in &parent.modules {
            let from = self.filtered_node(parent);
            let to = self.filtered_node(module);
            self.builder.add_edge_with(from.as_ref(), to.as_ref(), &dotted);
            self.add_module_edges(module);
        }
    }

    fn filtered_node(&self, project: &Project) -> Option<GraphNode> {
        if self.global_filter.include(&project.artifact) {
            Some(GraphNode::new(project.artifact.clone()))
        } else {
            debug!(project = %project.artifact, "project filtered from module edges");
            None
        }
    }
}

impl GraphFactory for AggregatingGraphFactory<'_> {
    fn create_graph(&mut self, project: &Project) -> Result<String> {
        self.builder.graph_name(project.artifact.artifact_id());
        if self.include_parent_projects {
            self.add_module_edges(project);
        }

        for module in project.collected_projects() {
            self.adapter
                .build_dependency_graph(module, self.global_filter.as_ref(), self.builder.as_mut())?;
        }
        Ok(self.builder.render())
    }
}
