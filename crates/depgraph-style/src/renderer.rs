use std::rc::Rc;

use depgraph_core::{AttributeBuilder, EdgeAttributeRenderer, GraphNode, NodeAttributeRenderer};

use crate::config::StyleConfiguration;

/// Node attributes backed by a [`StyleConfiguration`].
pub struct DependencyNodeAttributeRenderer {
    show_group_id: bool,
    show_artifact_id: bool,
    show_version: bool,
    style: Rc<StyleConfiguration>,
}

impl DependencyNodeAttributeRenderer {
    pub fn new(
        show_group_id: bool,
        show_artifact_id: bool,
        show_version: bool,
        style: Rc<StyleConfiguration>,
    ) -> Self {
        Self {
            show_group_id,
            show_artifact_id,
            show_version,
            style,
        }
    }
}

impl NodeAttributeRenderer for DependencyNodeAttributeRenderer {
    fn create_node_attributes(&self, node: &GraphNode) -> AttributeBuilder {
        self.style
            .node_attributes(node, self.show_group_id, self.show_artifact_id, self.show_version)
    }
}

/// Edge attributes backed by a [`StyleConfiguration`].
pub struct DependencyEdgeAttributeRenderer {
    show_versions: bool,
    style: Rc<StyleConfiguration>,
}

impl DependencyEdgeAttributeRenderer {
    pub fn new(show_versions: bool, style: Rc<StyleConfiguration>) -> Self {
        Self {
            show_versions,
            style,
        }
    }
}

impl EdgeAttributeRenderer for DependencyEdgeAttributeRenderer {
    fn create_edge_attributes(&self, _from: &GraphNode, to: &GraphNode) -> AttributeBuilder {
        self.style.edge_attributes(to, self.show_versions)
    }
}
