//! Depth-first traversal of resolved dependency trees.
//!
//! [`walk`] drives any [`DependencyVisitor`]: `visit` is called on the way
//! down and decides whether the children are walked, `end_visit` is called on
//! the way up for every visited node, including those whose subtree was skipped.
//!
//! [`GraphBuildingVisitor`] is the visitor feeding a [`GraphBuilder`]. It
//! applies three independent checks:
//!
//! - the global filter prunes a node together with its whole subtree;
//! - the target filter keeps an edge only if the child is a target or has an
//!   accepted descendant, so the graph is reduced to paths leading to targets;
//! - the accepted resolution set drops edges to nodes the resolver omitted.
//!
//! Edges are added on the way up, so descendants are decided before their parents.

use std::collections::BTreeSet;

use tracing::debug;

use crate::artifact::NodeResolution;
use crate::filter::ArtifactFilter;
use crate::graph::GraphBuilder;
use crate::node::{DependencyNode, GraphNode};

/// Outcome of visiting one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitDecision {
    /// Walk the children.
    Recurse,
    /// Do not walk the children; `end_visit` is still called.
    SkipSubtree,
    /// Abort the whole walk.
    Stop,
}

pub trait DependencyVisitor {
    fn visit(&mut self, node: &DependencyNode) -> VisitDecision;

    /// Returning [`VisitDecision::Stop`] aborts the walk; anything else continues.
    fn end_visit(&mut self, node: &DependencyNode) -> VisitDecision;
}

/// Walk `node` depth first. Returns [`VisitDecision::Stop`] if the visitor aborted.
pub fn walk(node: &DependencyNode, visitor: &mut dyn DependencyVisitor) -> VisitDecision {
    match visitor.visit(node) {
        VisitDecision::Stop => return VisitDecision::Stop,
        VisitDecision::SkipSubtree => {}
        VisitDecision::Recurse => {
            for child in &node.children {
                if walk(child, visitor) == VisitDecision::Stop {
                    return VisitDecision::Stop;
                }
            }
        }
    }
    match visitor.end_visit(node) {
        VisitDecision::Stop => VisitDecision::Stop,
        _ => VisitDecision::Recurse,
    }
}

struct Frame {
    node: GraphNode,
    /// Set once an edge to one of the children was accepted.
    retained: bool,
}

pub struct GraphBuildingVisitor<'a> {
    builder: &'a mut dyn GraphBuilder,
    global_filter: &'a dyn ArtifactFilter,
    target_filter: &'a dyn ArtifactFilter,
    included_resolutions: BTreeSet<NodeResolution>,
    stack: Vec<Frame>,
}

impl<'a> GraphBuildingVisitor<'a> {
    pub fn new(
        builder: &'a mut dyn GraphBuilder,
        global_filter: &'a dyn ArtifactFilter,
        target_filter: &'a dyn ArtifactFilter,
        included_resolutions: BTreeSet<NodeResolution>,
    ) -> Self {
        Self {
            builder,
            global_filter,
            target_filter,
            included_resolutions,
            stack: Vec::new(),
        }
    }

    /// Visitor accepting every resolution, for graphs that are already resolved.
    pub fn accepting_all(
        builder: &'a mut dyn GraphBuilder,
        global_filter: &'a dyn ArtifactFilter,
        target_filter: &'a dyn ArtifactFilter,
    ) -> Self {
        Self::new(builder, global_filter, target_filter, NodeResolution::all())
    }
}

impl DependencyVisitor for GraphBuildingVisitor<'_> {
    fn visit(&mut self, node: &DependencyNode) -> VisitDecision {
        if !self.global_filter.include(&node.artifact) {
            debug!(artifact = %node.artifact, "filtered, skipping subtree");
            return VisitDecision::SkipSubtree;
        }

        let occurrence = GraphNode::from(node);
        let effective = self.builder.effective_node(&occurrence).clone();
        self.stack.push(Frame {
            node: effective,
            retained: false,
        });
        VisitDecision::Recurse
    }

    fn end_visit(&mut self, node: &DependencyNode) -> VisitDecision {
        // Filters are pure, so this matches the decision taken in `visit`.
        if !self.global_filter.include(&node.artifact) {
            return VisitDecision::Recurse;
        }
        let Some(frame) = self.stack.pop() else {
            return VisitDecision::Recurse;
        };

        let leads_to_target = frame.retained || self.target_filter.include(&node.artifact);
        if !leads_to_target {
            debug!(artifact = %node.artifact, "not on a path to a target");
            return VisitDecision::Recurse;
        }
        if !self.included_resolutions.contains(&node.resolution) {
            debug!(artifact = %node.artifact, resolution = %node.resolution, "resolution not accepted");
            return VisitDecision::Recurse;
        }

        if let Some(parent) = self.stack.last_mut() {
            let child = GraphNode::from(node);
            self.builder.add_edge(Some(&parent.node), Some(&child));
            parent.retained = true;
        }
        VisitDecision::Recurse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Artifact;
    use crate::filter::AcceptAll;
    use crate::graph::{GraphConfig, GraphStore};

    struct EdgeList {
        store: GraphStore,
    }

    impl EdgeList {
        fn new() -> Self {
            Self {
                store: GraphStore::new(GraphConfig::new()),
            }
        }

        fn node_names(&self) -> Vec<String> {
            self.store.nodes().map(|(n, _)| n.to_string()).collect()
        }
    }

    impl GraphBuilder for EdgeList {
        fn store(&self) -> &GraphStore {
            &self.store
        }

        fn store_mut(&mut self) -> &mut GraphStore {
            &mut self.store
        }

        fn render(&self) -> String {
            let lines: Vec<String> = self
                .store
                .edges()
                .map(|(e, _)| format!("{} -> {}", short(&e.from), short(&e.to)))
                .collect();
            lines.join("\n")
        }
    }

    fn short(name: &str) -> &str {
        name.split(':').nth(1).unwrap_or(name)
    }

    fn dep(name: &str, children: Vec<DependencyNode>) -> DependencyNode {
        DependencyNode::new(Artifact::new("groupId", name, "version").with_scope("compile"))
            .with_children(children)
    }

    fn named(name: &'static str) -> impl Fn(&Artifact) -> bool {
        move |a: &Artifact| a.artifact_id() == name
    }

    #[test]
    fn test_parent_and_child() {
        let child = dep("child", vec![]);
        let parent = dep("parent", vec![child.clone()]);
        let mut builder = EdgeList::new();

        {
            let mut visitor = GraphBuildingVisitor::accepting_all(&mut builder, &AcceptAll, &AcceptAll);
            assert_eq!(visitor.visit(&parent), VisitDecision::Recurse);
            assert_eq!(visitor.visit(&child), VisitDecision::Recurse);
            assert_eq!(visitor.end_visit(&child), VisitDecision::Recurse);
            assert_eq!(visitor.end_visit(&parent), VisitDecision::Recurse);
        }

        assert_eq!(builder.render(), "parent -> child");
        assert_eq!(builder.store().node_count(), 2);
    }

    #[test]
    fn test_global_filter_prunes_subtree() {
        let child1 = dep("child1", vec![]);
        let child2 = dep("child2", vec![dep("grandchild", vec![])]);
        let parent = dep("parent", vec![child1.clone(), child2.clone()]);
        let global = |a: &Artifact| a.artifact_id() != "child2";
        let mut builder = EdgeList::new();

        {
            let mut visitor = GraphBuildingVisitor::accepting_all(&mut builder, &global, &AcceptAll);
            assert_eq!(visitor.visit(&parent), VisitDecision::Recurse);
            assert_eq!(visitor.visit(&child1), VisitDecision::Recurse);
            visitor.end_visit(&child1);
            assert_eq!(visitor.visit(&child2), VisitDecision::SkipSubtree);
            visitor.end_visit(&child2);
            visitor.end_visit(&parent);
        }

        assert_eq!(builder.render(), "parent -> child1");
        assert_eq!(builder.store().node_count(), 2);
    }

    #[test]
    fn test_walk_never_enters_filtered_subtree() {
        let tree = dep(
            "parent",
            vec![dep("child1", vec![]), dep("child2", vec![dep("grandchild", vec![])])],
        );
        let global = |a: &Artifact| a.artifact_id() != "child2";
        let mut builder = EdgeList::new();

        let mut visitor = GraphBuildingVisitor::accepting_all(&mut builder, &global, &AcceptAll);
        assert_eq!(walk(&tree, &mut visitor), VisitDecision::Recurse);

        assert_eq!(builder.render(), "parent -> child1");
        assert!(!builder.node_names().iter().any(|n| n.contains("grandchild")));
    }

    #[test]
    fn test_target_filter_keeps_only_target_paths() {
        let child1 = dep("child1", vec![dep("leaf", vec![])]);
        let child2 = dep("child2", vec![]);
        let tree = dep("parent", vec![child1, child2]);
        let target = named("child2");
        let mut builder = EdgeList::new();

        let mut visitor = GraphBuildingVisitor::accepting_all(&mut builder, &AcceptAll, &target);
        walk(&tree, &mut visitor);

        assert_eq!(builder.render(), "parent -> child2");
        assert_eq!(builder.store().node_count(), 2);
    }

    #[test]
    fn test_non_target_subtree_is_still_traversed() {
        let leaf = dep("leaf", vec![]);
        let child1 = dep("child1", vec![leaf.clone()]);
        let child2 = dep("child2", vec![]);
        let parent = dep("parent", vec![child1.clone(), child2.clone()]);
        let target = named("child2");
        let mut builder = EdgeList::new();

        {
            let mut visitor = GraphBuildingVisitor::accepting_all(&mut builder, &AcceptAll, &target);
            assert_eq!(visitor.visit(&parent), VisitDecision::Recurse);
            assert_eq!(visitor.visit(&child1), VisitDecision::Recurse);
            assert_eq!(visitor.visit(&leaf), VisitDecision::Recurse);
            assert_eq!(visitor.end_visit(&leaf), VisitDecision::Recurse);
            assert_eq!(visitor.end_visit(&child1), VisitDecision::Recurse);
            assert_eq!(visitor.visit(&child2), VisitDecision::Recurse);
            assert_eq!(visitor.end_visit(&child2), VisitDecision::Recurse);
            assert_eq!(visitor.end_visit(&parent), VisitDecision::Recurse);
        }

        assert_eq!(builder.render(), "parent -> child2");
    }

    #[test]
    fn test_target_filter_retains_ancestor_path() {
        let tree = dep(
            "root",
            vec![
                dep("middle", vec![dep("target", vec![]), dep("noise", vec![])]),
                dep("unrelated", vec![]),
            ],
        );
        let target = named("target");
        let mut builder = EdgeList::new();

        let mut visitor = GraphBuildingVisitor::accepting_all(&mut builder, &AcceptAll, &target);
        walk(&tree, &mut visitor);

        assert_eq!(builder.render(), "middle -> target\nroot -> middle");
    }

    #[test]
    fn test_resolution_not_accepted_drops_edge() {
        let omitted = dep("dup", vec![]).with_resolution(
            NodeResolution::OmittedForDuplicate,
            Some(Artifact::new("groupId", "dup", "version")),
        );
        let tree = dep("parent", vec![dep("kept", vec![]), omitted]);
        let included: BTreeSet<_> = [NodeResolution::Included].into_iter().collect();
        let mut builder = EdgeList::new();

        let mut visitor = GraphBuildingVisitor::new(&mut builder, &AcceptAll, &AcceptAll, included);
        walk(&tree, &mut visitor);

        assert_eq!(builder.render(), "parent -> kept");
    }

    struct StopAt(&'static str, Vec<String>);

    impl DependencyVisitor for StopAt {
        fn visit(&mut self, node: &DependencyNode) -> VisitDecision {
            self.1.push(node.artifact.artifact_id().to_string());
            if node.artifact.artifact_id() == self.0 {
                VisitDecision::Stop
            } else {
                VisitDecision::Recurse
            }
        }

        fn end_visit(&mut self, _node: &DependencyNode) -> VisitDecision {
            VisitDecision::Recurse
        }
    }

    #[test]
    fn test_walk_stop_aborts() {
        let tree = dep("a", vec![dep("b", vec![dep("c", vec![])]), dep("d", vec![])]);
        let mut visitor = StopAt("c", Vec::new());

        assert_eq!(walk(&tree, &mut visitor), VisitDecision::Stop);
        assert_eq!(visitor.1, vec!["a", "b", "c"]);
    }
}
