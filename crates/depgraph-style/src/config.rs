//! Loading and querying the effective style configuration.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use depgraph_core::{ArtifactPattern, AttributeBuilder, GraphNode, LabelBuilder, NodeResolution};
use depgraph_error::{Error, ErrorKind, Result};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::{debug, info};

use crate::merge::Merge;
use crate::model::{NodeStyle, StyleLayer};

const BUILTIN_PREFIX: &str = "builtin:";

/// Style presets compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum BuiltInStyleResource {
    Default,
    GroupIdOnly,
}

impl BuiltInStyleResource {
    pub fn content(self) -> &'static str {
        match self {
            BuiltInStyleResource::Default => include_str!("../resources/default-style.json"),
            BuiltInStyleResource::GroupIdOnly => include_str!("../resources/group-id-only-style.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleResource {
    BuiltIn(BuiltInStyleResource),
    File(PathBuf),
}

impl StyleResource {
    /// A user supplied resource: `builtin:<preset>` or a filesystem path.
    pub fn custom(value: &str) -> Result<Self> {
        let Some(name) = value.strip_prefix(BUILTIN_PREFIX) else {
            return Ok(StyleResource::File(PathBuf::from(value)));
        };
        BuiltInStyleResource::from_str(name)
            .map(StyleResource::BuiltIn)
            .map_err(|e| {
                Error::config_invalid(format!("unknown built-in style '{name}'"))
                    .with_operation("style::custom_resource")
                    .set_source(e)
            })
    }

    pub fn exists(&self) -> bool {
        match self {
            StyleResource::BuiltIn(_) => true,
            StyleResource::File(path) => path.is_file(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            StyleResource::BuiltIn(preset) => Ok(preset.content().to_string()),
            StyleResource::File(path) => fs::read_to_string(path).map_err(|e| {
                Error::from(e)
                    .with_operation("style::read")
                    .with_context("path", path.display().to_string())
            }),
        }
    }

    fn parse(&self) -> Result<StyleLayer> {
        let content = self.read()?;
        serde_json::from_str(&content).map_err(|e| {
            Error::config_invalid("malformed style configuration")
                .with_operation("style::parse")
                .with_context("resource", self.to_string())
                .set_source(e)
        })
    }
}

impl fmt::Display for StyleResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleResource::BuiltIn(preset) => write!(f, "{BUILTIN_PREFIX}{preset}"),
            StyleResource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    pattern: ArtifactPattern,
    style: NodeStyle,
}

/// The merged, read-only style view of one invocation.
#[derive(Debug, Clone)]
pub struct StyleConfiguration {
    layer: StyleLayer,
    rules: Vec<CompiledRule>,
}

impl StyleConfiguration {
    /// Load `default_resource`, then layer `additional` on top in order.
    ///
    /// Every resource is checked before any is parsed, so a missing custom
    /// resource fails before the others are read.
    pub fn load(default_resource: &StyleResource, additional: &[StyleResource]) -> Result<Self> {
        let resources: Vec<&StyleResource> =
            std::iter::once(default_resource).chain(additional).collect();

        if let Some(missing) = resources.iter().find(|r| !r.exists()) {
            return Err(Error::style_not_found(missing.to_string()).with_operation("style::load"));
        }

        let mut layers = Vec::with_capacity(resources.len());
        for resource in resources {
            debug!(%resource, "loading style resource");
            layers.push(resource.parse()?);
        }
        let configuration = Self::from_layers(layers)?;
        info!(rules = configuration.rules.len(), "style configuration loaded");
        Ok(configuration)
    }

    /// Fold already parsed layers. Fails on malformed rule patterns.
    pub fn from_layers(layers: impl IntoIterator<Item = StyleLayer>) -> Result<Self> {
        let layer = layers
            .into_iter()
            .fold(StyleLayer::default(), |merged, layer| merged.merge(&layer));

        let rules = layer
            .node_rules
            .iter()
            .map(|rule| {
                let pattern = ArtifactPattern::parse(&rule.pattern).map_err(|e| {
                    Error::new(ErrorKind::ConfigInvalid, "invalid node rule pattern")
                        .with_operation("style::compile_rules")
                        .with_context("pattern", rule.pattern.clone())
                        .set_source(e)
                })?;
                Ok(CompiledRule {
                    pattern,
                    style: rule.style.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { layer, rules })
    }

    pub fn layer(&self) -> &StyleLayer {
        &self.layer
    }

    /// The effective configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.layer).map_err(|e| {
            Error::new(ErrorKind::SerializationFailed, "unable to serialize style configuration")
                .with_operation("style::to_json")
                .set_source(e)
        })
    }

    /// Graph wide `node [...]` attributes.
    pub fn default_node_attributes(&self) -> AttributeBuilder {
        self.layer.default_node.create_attributes()
    }

    /// Graph wide `edge [...]` attributes.
    pub fn default_edge_attributes(&self) -> AttributeBuilder {
        self.layer.default_edge.create_attributes()
    }

    /// Style of `node`: defaults, then its artifact type, then its scope, then
    /// every matching rule in order.
    pub fn resolve_node_style(&self, node: &GraphNode) -> NodeStyle {
        let artifact = node.artifact();
        let mut style = self.layer.default_node.clone();
        if let Some(by_type) = self.layer.node_types.get(artifact.artifact_type()) {
            style = style.merge(by_type);
        }
        if let Some(by_scope) = self.layer.scope_styles.get(artifact.scope()) {
            style = style.merge(by_scope);
        }
        for rule in self.rules.iter().filter(|r| r.pattern.matches(artifact)) {
            style = style.merge(&rule.style);
        }
        style
    }

    /// Per-node attributes with the segmented label.
    ///
    /// A node omitted for a conflict shows the winning version next to its own.
    ///
    /// Shape and color attributes are only repeated on the node when they differ
    /// from the graph wide defaults.
    pub fn node_attributes(
        &self,
        node: &GraphNode,
        show_group_id: bool,
        show_artifact_id: bool,
        show_version: bool,
    ) -> AttributeBuilder {
        let style = self.resolve_node_style(node);
        let artifact = node.artifact();
        let scopes = node.scopes().iter().map(String::as_str).collect::<Vec<_>>().join("/");
        let version = match (node.resolution(), node.related_artifact()) {
            (NodeResolution::OmittedForConflict, Some(related)) => {
                format!("{} ({})", artifact.version(), related.version())
            }
            _ => artifact.version().to_string(),
        };

        let label = LabelBuilder::new()
            .segment(show_group_id.then_some(artifact.group_id()), style.group_id_font.segment_font())
            .segment(
                show_artifact_id.then_some(artifact.artifact_id()),
                style.artifact_id_font.segment_font(),
            )
            .segment(show_version.then_some(version.as_str()), style.version_font.segment_font())
            .segment(Some(scopes.as_str()), style.scope_font.segment_font())
            .build();

        let builder = if style != self.layer.default_node {
            style.create_attributes()
        } else {
            AttributeBuilder::new()
        };
        builder.label(Some(label.as_str()).filter(|l| !l.is_empty()))
    }

    /// Per-edge attributes, keyed on the target node.
    ///
    /// With `show_versions`, edges to conflicting or duplicate nodes use the
    /// dedicated styles; a conflict edge is labelled with the competing version.
    pub fn edge_attributes(&self, to: &GraphNode, show_versions: bool) -> AttributeBuilder {
        if show_versions {
            match to.resolution() {
                NodeResolution::OmittedForConflict => {
                    let version = to.related_artifact().map(|a| a.version());
                    return self.layer.conflict_edge.create_attributes().label(version);
                }
                NodeResolution::OmittedForDuplicate => {
                    return self.layer.duplicate_edge.create_attributes();
                }
                _ => {}
            }
        }
        self.layer
            .edge_types
            .get(to.artifact().scope())
            .map(|edge| edge.create_attributes())
            .unwrap_or_default()
    }
}
