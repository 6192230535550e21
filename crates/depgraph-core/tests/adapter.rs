use std::cell::Cell;
use std::collections::BTreeSet;

use depgraph_core::{
    AcceptAll, AggregatingGraphFactory, Artifact, DependencyGraphResolver, DependencyNode,
    DependencyTreeResolver, DynError, ErrorKind, GraphBuilder, GraphBuilderAdapter, GraphConfig,
    GraphFactory, GraphNode, GraphStore, NodeResolution, Project, SimpleGraphFactory,
};
use pretty_assertions::assert_eq;

/// Minimal exporter: one `from -> to [attrs]` line per edge.
struct EdgeLines {
    store: GraphStore,
}

impl EdgeLines {
    fn boxed() -> Box<dyn GraphBuilder> {
        let config = GraphConfig::new()
            .with_node_names(|node: &GraphNode| node.artifact().artifact_id().to_string());
        Box::new(Self {
            store: GraphStore::new(config),
        })
    }
}

impl GraphBuilder for EdgeLines {
    fn store(&self) -> &GraphStore {
        &self.store
    }

    fn store_mut(&mut self) -> &mut GraphStore {
        &mut self.store
    }

    fn render(&self) -> String {
        let mut out = format!("{}\n", self.store.graph_name());
        for (edge, attributes) in self.store.edges() {
            out.push_str(&format!("{} -> {}{}\n", edge.from, edge.to, attributes));
        }
        out
    }
}

fn artifact(name: &str) -> Artifact {
    Artifact::new("g", name, "1.0").with_scope("compile")
}

fn tree() -> DependencyNode {
    DependencyNode::new(Artifact::new("g", "app", "1.0")).with_children(vec![
        DependencyNode::new(artifact("lib")),
        DependencyNode::new(artifact("old")).with_resolution(
            NodeResolution::OmittedForConflict,
            Some(Artifact::new("g", "old", "2.0")),
        ),
    ])
}

#[derive(Default)]
struct Resolvers {
    graph_calls: Cell<usize>,
    tree_calls: Cell<usize>,
    fail: bool,
}

impl DependencyGraphResolver for Resolvers {
    fn build_dependency_graph(
        &self,
        project: &Project,
        _filter: &dyn depgraph_core::ArtifactFilter,
    ) -> Result<DependencyNode, DynError> {
        self.graph_calls.set(self.graph_calls.get() + 1);
        if self.fail {
            return Err("resolution exploded".into());
        }
        Ok(DependencyNode::new(project.artifact.clone())
            .with_children(vec![DependencyNode::new(artifact("lib"))]))
    }
}

impl DependencyTreeResolver for Resolvers {
    fn build_dependency_tree(
        &self,
        _project: &Project,
        _filter: &dyn depgraph_core::ArtifactFilter,
    ) -> Result<DependencyNode, DynError> {
        self.tree_calls.set(self.tree_calls.get() + 1);
        if self.fail {
            return Err("resolution exploded".into());
        }
        Ok(tree())
    }
}

fn project() -> Project {
    Project::new(Artifact::new("g", "app", "1.0"))
}

#[test]
fn test_graph_mode_uses_graph_resolver() {
    let resolvers = Resolvers::default();
    let adapter = GraphBuilderAdapter::for_graph(&resolvers, AcceptAll);
    let mut builder = EdgeLines::boxed();

    adapter
        .build_dependency_graph(&project(), &AcceptAll, builder.as_mut())
        .unwrap();

    assert_eq!(resolvers.graph_calls.get(), 1);
    assert_eq!(resolvers.tree_calls.get(), 0);
    assert_eq!(builder.render(), "G\napp -> lib\n");
}

#[test]
fn test_tree_mode_uses_tree_resolver_and_resolutions() {
    let resolvers = Resolvers::default();
    let included: BTreeSet<_> = [NodeResolution::Included].into_iter().collect();
    let adapter = GraphBuilderAdapter::for_tree(&resolvers, AcceptAll, included);
    let mut builder = EdgeLines::boxed();

    adapter
        .build_dependency_graph(&project(), &AcceptAll, builder.as_mut())
        .unwrap();

    assert_eq!(resolvers.graph_calls.get(), 0);
    assert_eq!(resolvers.tree_calls.get(), 1);
    assert_eq!(builder.render(), "G\napp -> lib\n");
}

#[test]
fn test_tree_mode_with_conflicts_accepted() {
    let resolvers = Resolvers::default();
    let included: BTreeSet<_> = [NodeResolution::Included, NodeResolution::OmittedForConflict]
        .into_iter()
        .collect();
    let adapter = GraphBuilderAdapter::for_tree(&resolvers, AcceptAll, included);
    let mut builder = EdgeLines::boxed();

    adapter
        .build_dependency_graph(&project(), &AcceptAll, builder.as_mut())
        .unwrap();

    assert_eq!(builder.render(), "G\napp -> lib\napp -> old\n");
}

#[test]
fn test_tree_mode_applies_global_filter_again() {
    let resolvers = Resolvers::default();
    let adapter = GraphBuilderAdapter::for_tree(&resolvers, AcceptAll, NodeResolution::all());
    let mut builder = EdgeLines::boxed();
    let global = |a: &Artifact| a.artifact_id() != "lib";

    adapter
        .build_dependency_graph(&project(), &global, builder.as_mut())
        .unwrap();

    assert_eq!(resolvers.tree_calls.get(), 1);
    assert_eq!(builder.render(), "G\napp -> old\n");
    assert_eq!(builder.store().node_count(), 2);
}

#[test]
fn test_resolver_failure_is_wrapped() {
    let resolvers = Resolvers {
        fail: true,
        ..Default::default()
    };
    let adapter = GraphBuilderAdapter::for_graph(&resolvers, AcceptAll);
    let mut builder = EdgeLines::boxed();

    let err = adapter
        .build_dependency_graph(&project(), &AcceptAll, builder.as_mut())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::GraphBuildFailed);
    let source = std::error::Error::source(&err).expect("cause is kept");
    assert_eq!(source.to_string(), "resolution exploded");
    assert!(err.context().iter().any(|(k, v)| *k == "project" && v.contains("app")));
    assert_eq!(builder.store().edge_count(), 0);
}

#[test]
fn test_simple_factory_names_graph_after_artifact() {
    let resolvers = Resolvers::default();
    let adapter = GraphBuilderAdapter::for_graph(&resolvers, AcceptAll);
    let mut factory = SimpleGraphFactory::new(adapter, AcceptAll, EdgeLines::boxed());

    let graph = factory.create_graph(&project()).unwrap();

    assert_eq!(graph, "app\napp -> lib\n");
}

#[test]
fn test_aggregating_factory_with_parent_projects() {
    let parent = Project::new(Artifact::new("g", "parent", "1.0").with_type("pom")).with_modules(vec![
        Project::new(Artifact::new("g", "module-a", "1.0")),
        Project::new(Artifact::new("g", "module-b", "1.0")),
    ]);
    let resolvers = Resolvers::default();
    let adapter = GraphBuilderAdapter::for_graph(&resolvers, AcceptAll);
    let mut factory = AggregatingGraphFactory::new(adapter, AcceptAll, EdgeLines::boxed(), true);

    let graph = factory.create_graph(&parent).unwrap();

    assert_eq!(resolvers.graph_calls.get(), 2);
    assert_eq!(
        graph,
        "parent\n\
         parent -> module-a[style=\"dotted\"]\n\
         parent -> module-b[style=\"dotted\"]\n\
         module-a -> lib\n\
         module-b -> lib\n"
    );
}

#[test]
fn test_aggregating_factory_filters_parent_edges() {
    let parent = Project::new(Artifact::new("g", "parent", "1.0"))
        .with_modules(vec![Project::new(Artifact::new("g", "module-a", "1.0"))]);
    let resolvers = Resolvers::default();
    let adapter = GraphBuilderAdapter::for_graph(&resolvers, AcceptAll);
    let global = |a: &Artifact| a.artifact_id() != "parent";
    let mut factory = AggregatingGraphFactory::new(adapter, global, EdgeLines::boxed(), true);

    let graph = factory.create_graph(&parent).unwrap();

    assert_eq!(graph, "parent\nmodule-a -> lib\n");
}
