//! Field-wise layering of style data.
//!
//! Merging never mutates: `base.merge(&over)` returns a new value where every
//! field set to a non-blank value in `over` wins and every other field keeps
//! the value from `base`. Folding an ordered list of layers with it therefore
//! yields, per field, the last non-blank value.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::model::{EdgeStyle, Font, NodeStyle, StyleLayer, non_blank};

pub trait Merge {
    fn merge(&self, over: &Self) -> Self;
}

fn pick_text(base: &Option<String>, over: &Option<String>) -> Option<String> {
    match non_blank(over) {
        Some(_) => over.clone(),
        None => base.clone(),
    }
}

fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
    over.as_ref().or(base.as_ref()).cloned()
}

impl Merge for Font {
    fn merge(&self, over: &Self) -> Self {
        Font {
            name: pick_text(&self.name, &over.name),
            size: pick(&self.size, &over.size),
            color: pick_text(&self.color, &over.color),
        }
    }
}

impl Merge for NodeStyle {
    fn merge(&self, over: &Self) -> Self {
        NodeStyle {
            shape: pick(&self.shape, &over.shape),
            color: pick_text(&self.color, &over.color),
            fill_color: pick_text(&self.fill_color, &over.fill_color),
            style: pick_text(&self.style, &over.style),
            default_font: self.default_font.merge(&over.default_font),
            group_id_font: self.group_id_font.merge(&over.group_id_font),
            artifact_id_font: self.artifact_id_font.merge(&over.artifact_id_font),
            version_font: self.version_font.merge(&over.version_font),
            scope_font: self.scope_font.merge(&over.scope_font),
        }
    }
}

impl Merge for EdgeStyle {
    fn merge(&self, over: &Self) -> Self {
        EdgeStyle {
            style: pick_text(&self.style, &over.style),
            color: pick_text(&self.color, &over.color),
            font: self.font.merge(&over.font),
        }
    }
}

impl<K, V> Merge for IndexMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Merge,
{
    /// Entries present in both maps merge; new keys are appended.
    fn merge(&self, over: &Self) -> Self {
        let mut merged = self.clone();
        for (key, value) in over {
            let entry = match merged.get(key) {
                Some(existing) => existing.merge(value),
                None => value.clone(),
            };
            merged.insert(key.clone(), entry);
        }
        merged
    }
}

impl Merge for StyleLayer {
    fn merge(&self, over: &Self) -> Self {
        let mut node_rules = self.node_rules.clone();
        node_rules.extend(over.node_rules.iter().cloned());

        StyleLayer {
            default_node: self.default_node.merge(&over.default_node),
            node_types: self.node_types.merge(&over.node_types),
            scope_styles: self.scope_styles.merge(&over.scope_styles),
            node_rules,
            default_edge: self.default_edge.merge(&over.default_edge),
            edge_types: self.edge_types.merge(&over.edge_types),
            conflict_edge: self.conflict_edge.merge(&over.conflict_edge),
            duplicate_edge: self.duplicate_edge.merge(&over.duplicate_edge),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontSize, NodeShape};
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn font(name: Option<&str>, size: Option<u32>, color: Option<&str>) -> Font {
        Font {
            name: name.map(str::to_string),
            size: size.map(FontSize::new),
            color: color.map(str::to_string),
        }
    }

    #[test]
    fn test_blank_never_overrides() {
        let base = EdgeStyle {
            style: text("dashed"),
            color: text("red"),
            ..Default::default()
        };
        let over = EdgeStyle {
            style: text("   "),
            color: None,
            ..Default::default()
        };
        assert_eq!(base.merge(&over), base);
    }

    #[test]
    fn test_font_fields_merge_independently() {
        let base = font(Some("Helvetica"), Some(14), Some("black"));
        let over = font(None, None, Some("red"));
        assert_eq!(base.merge(&over), font(Some("Helvetica"), Some(14), Some("red")));
    }

    #[test]
    fn test_last_non_blank_wins_across_layers() {
        let a = NodeStyle {
            color: text("a"),
            fill_color: text("a"),
            shape: Some(NodeShape::Box),
            ..Default::default()
        };
        let b = NodeStyle {
            color: text("b"),
            ..Default::default()
        };
        let c = NodeStyle {
            fill_color: text(""),
            shape: Some(NodeShape::Ellipse),
            ..Default::default()
        };

        let folded = [b.clone(), c.clone()]
            .iter()
            .fold(a.clone(), |acc, layer| acc.merge(layer));

        assert_eq!(folded.color, text("b"));
        assert_eq!(folded.fill_color, text("a"));
        assert_eq!(folded.shape, Some(NodeShape::Ellipse));
        assert_eq!(folded, a.merge(&b.merge(&c)));
    }

    #[test]
    fn test_keyed_sections_merge_per_key() {
        let mut base = IndexMap::new();
        base.insert(
            "test".to_string(),
            EdgeStyle {
                style: text("dashed"),
                color: text("grey"),
                ..Default::default()
            },
        );
        let mut over = IndexMap::new();
        over.insert(
            "test".to_string(),
            EdgeStyle {
                color: text("blue"),
                ..Default::default()
            },
        );
        over.insert(
            "runtime".to_string(),
            EdgeStyle {
                style: text("dotted"),
                ..Default::default()
            },
        );

        let merged = base.merge(&over);

        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["test", "runtime"]);
        assert_eq!(merged["test"].style, text("dashed"));
        assert_eq!(merged["test"].color, text("blue"));
    }
}
