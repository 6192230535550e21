//! Serialisable style data: one [`StyleLayer`] per style resource.

use depgraph_core::AttributeBuilder;
use depgraph_core::label::SegmentFont;
use depgraph_error::Error;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Font size in points. Negative sizes are rejected while deserialising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct FontSize(u32);

impl FontSize {
    pub fn new(size: u32) -> Self {
        Self(size)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for FontSize {
    type Error = Error;

    fn try_from(size: i64) -> Result<Self, Self::Error> {
        u32::try_from(size)
            .map(FontSize)
            .map_err(|_| Error::negative_font_size(size))
    }
}

impl From<FontSize> for i64 {
    fn from(size: FontSize) -> Self {
        i64::from(size.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<FontSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Font {
    pub fn is_empty(&self) -> bool {
        non_blank(&self.name).is_none() && self.size.is_none() && non_blank(&self.color).is_none()
    }

    pub fn size(&self) -> Option<u32> {
        self.size.map(FontSize::get)
    }

    pub fn segment_font(&self) -> SegmentFont<'_> {
        SegmentFont {
            name: non_blank(&self.name),
            color: non_blank(&self.color),
            size: self.size(),
        }
    }

    fn apply(&self, builder: AttributeBuilder) -> AttributeBuilder {
        builder
            .font_name(non_blank(&self.name))
            .font_size(self.size())
            .font_color(non_blank(&self.color))
    }
}

/// Node outline. Serialised as `{"type": "polygon", "sides": 6}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeShape {
    Box,
    Ellipse,
    Circle,
    Plaintext,
    Polygon {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sides: Option<u32>,
    },
}

impl NodeShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeShape::Box => "box",
            NodeShape::Ellipse => "ellipse",
            NodeShape::Circle => "circle",
            NodeShape::Plaintext => "plaintext",
            NodeShape::Polygon { .. } => "polygon",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<NodeShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Font::is_empty")]
    pub default_font: Font,
    #[serde(skip_serializing_if = "Font::is_empty")]
    pub group_id_font: Font,
    #[serde(skip_serializing_if = "Font::is_empty")]
    pub artifact_id_font: Font,
    #[serde(skip_serializing_if = "Font::is_empty")]
    pub version_font: Font,
    #[serde(skip_serializing_if = "Font::is_empty")]
    pub scope_font: Font,
}

impl NodeStyle {
    /// Shape, colors and default font, without a label.
    pub fn create_attributes(&self) -> AttributeBuilder {
        let mut builder = AttributeBuilder::new().shape(self.shape.as_ref().map(NodeShape::as_str));
        if let Some(NodeShape::Polygon { sides: Some(sides) }) = &self.shape {
            builder = builder.add_attribute("sides", sides.to_string().as_str());
        }
        let builder = builder
            .style(non_blank(&self.style))
            .color(non_blank(&self.color))
            .fill_color(non_blank(&self.fill_color));
        self.default_font.apply(builder)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EdgeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Font::is_empty")]
    pub font: Font,
}

impl EdgeStyle {
    pub fn create_attributes(&self) -> AttributeBuilder {
        let builder = AttributeBuilder::new()
            .style(non_blank(&self.style))
            .color(non_blank(&self.color));
        self.font.apply(builder)
    }
}

/// Node style applied to every artifact matching `pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRule {
    pub pattern: String,
    pub style: NodeStyle,
}

/// The content of one style resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StyleLayer {
    pub default_node: NodeStyle,
    /// Keyed by artifact type.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub node_types: IndexMap<String, NodeStyle>,
    /// Keyed by scope.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub scope_styles: IndexMap<String, NodeStyle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub node_rules: Vec<NodeRule>,
    pub default_edge: EdgeStyle,
    /// Keyed by the scope of the edge target.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub edge_types: IndexMap<String, EdgeStyle>,
    pub conflict_edge: EdgeStyle,
    pub duplicate_edge: EdgeStyle,
}

/// `None` for unset and whitespace-only values.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shape_json() {
        let style: NodeStyle =
            serde_json::from_str(r#"{"shape": {"type": "polygon", "sides": 6}, "color": "red"}"#)
                .unwrap();
        assert_eq!(style.shape, Some(NodeShape::Polygon { sides: Some(6) }));
        assert_eq!(
            style.create_attributes().to_string(),
            r#"[shape="polygon",sides="6",color="red"]"#
        );
    }

    #[test]
    fn test_negative_font_size_rejected() {
        let err = serde_json::from_str::<Font>(r#"{"size": -1}"#).unwrap_err();
        assert!(err.to_string().contains("Negative font size"));
    }

    #[test]
    fn test_zero_font_size_emits_nothing() {
        let edge: EdgeStyle = serde_json::from_str(r#"{"font": {"size": 0}}"#).unwrap();
        assert!(edge.create_attributes().is_empty());
    }

    #[test]
    fn test_blank_values_emit_nothing() {
        let style = NodeStyle {
            color: Some("  ".to_string()),
            style: Some(String::new()),
            ..Default::default()
        };
        assert!(style.create_attributes().is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(serde_json::from_str::<StyleLayer>(r#"{"defaultNodes": {}}"#).is_err());
    }
}
