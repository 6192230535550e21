//! Ordered key/value attribute sets in DOT attribute syntax.

use std::fmt;

use indexmap::IndexMap;

/// Escape special characters for quoted DOT strings.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn is_html_label(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('<') && value.ends_with('>')
}

/// Ordered attribute map serialised as `[k="v",k2="v2"]`.
///
/// Values are escaped and quoted on insertion. HTML-like labels (`<...>`) are
/// stored verbatim. `None` values are ignored; re-setting a key keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeBuilder {
    attributes: IndexMap<String, String>,
}

impl AttributeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label<'a>(mut self, label: impl Into<Option<&'a str>>) -> Self {
        match label.into() {
            Some(label) if is_html_label(label) => {
                self.attributes.insert("label".to_string(), label.to_string());
                self
            }
            other => self.add_attribute("label", other),
        }
    }

    pub fn font_name<'a>(self, font_name: impl Into<Option<&'a str>>) -> Self {
        self.add_attribute("fontname", font_name)
    }

    /// Zero or unset sizes produce no attribute.
    pub fn font_size(self, font_size: Option<u32>) -> Self {
        match font_size {
            Some(size) if size > 0 => self.add_attribute("fontsize", size.to_string().as_str()),
            _ => self,
        }
    }

    pub fn font_color<'a>(self, color: impl Into<Option<&'a str>>) -> Self {
        self.add_attribute("fontcolor", color)
    }

    pub fn style<'a>(self, style: impl Into<Option<&'a str>>) -> Self {
        self.add_attribute("style", style)
    }

    pub fn color<'a>(self, color: impl Into<Option<&'a str>>) -> Self {
        self.add_attribute("color", color)
    }

    pub fn fill_color<'a>(self, color: impl Into<Option<&'a str>>) -> Self {
        self.add_attribute("fillcolor", color)
    }

    pub fn shape<'a>(self, shape: impl Into<Option<&'a str>>) -> Self {
        self.add_attribute("shape", shape)
    }

    pub fn add_attribute<'a>(mut self, key: &str, value: impl Into<Option<&'a str>>) -> Self {
        if let Some(value) = value.into() {
            self.attributes
                .insert(key.to_string(), format!("\"{}\"", escape_label(value)));
        }
        self
    }

    /// Copy every attribute of `other` over this one, later values winning.
    pub fn merge(mut self, other: &AttributeBuilder) -> Self {
        for (key, value) in &other.attributes {
            self.attributes.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attributes as stored, values already escaped and quoted.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for AttributeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attributes.is_empty() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, (key, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty() {
        assert_eq!(AttributeBuilder::new().to_string(), "");
    }

    #[test]
    fn test_label() {
        assert_eq!(
            AttributeBuilder::new().label("someLabel").to_string(),
            r#"[label="someLabel"]"#
        );
    }

    #[test]
    fn test_html_label_passes_through() {
        let label = "<<b>text1\ntext2</b><font point-size=\"10\">text3</font>>";
        assert_eq!(
            AttributeBuilder::new().label(label).to_string(),
            format!("[label={label}]")
        );
    }

    #[test]
    fn test_font_size() {
        assert_eq!(
            AttributeBuilder::new().font_size(Some(12)).to_string(),
            r#"[fontsize="12"]"#
        );
        assert_eq!(AttributeBuilder::new().font_size(Some(0)).to_string(), "");
        assert_eq!(AttributeBuilder::new().font_size(None).to_string(), "");
    }

    #[test]
    fn test_single_attributes() {
        assert_eq!(
            AttributeBuilder::new().font_name("Helvetica").to_string(),
            r#"[fontname="Helvetica"]"#
        );
        assert_eq!(
            AttributeBuilder::new().font_color("green").to_string(),
            r#"[fontcolor="green"]"#
        );
        assert_eq!(
            AttributeBuilder::new().style("dashed").to_string(),
            r#"[style="dashed"]"#
        );
        assert_eq!(
            AttributeBuilder::new().fill_color("red").to_string(),
            r#"[fillcolor="red"]"#
        );
        assert_eq!(
            AttributeBuilder::new().shape("box").to_string(),
            r#"[shape="box"]"#
        );
        assert_eq!(
            AttributeBuilder::new()
                .add_attribute("someAttribute", "someValue")
                .to_string(),
            r#"[someAttribute="someValue"]"#
        );
    }

    #[test]
    fn test_none_value_is_skipped() {
        assert_eq!(
            AttributeBuilder::new()
                .add_attribute("someAttribute", None)
                .color(None)
                .to_string(),
            ""
        );
    }

    #[test]
    fn test_multiple_attributes_keep_order() {
        assert_eq!(
            AttributeBuilder::new()
                .label("someLabel")
                .color("green")
                .font_size(Some(10))
                .to_string(),
            r#"[label="someLabel",color="green",fontsize="10"]"#
        );
    }

    #[test]
    fn test_quoting_and_escaping() {
        assert_eq!(
            AttributeBuilder::new().label("some Label").to_string(),
            r#"[label="some Label"]"#
        );
        assert_eq!(
            AttributeBuilder::new().label("some\nLabel").to_string(),
            r#"[label="some\nLabel"]"#
        );
        assert_eq!(
            AttributeBuilder::new().label("say \"hi\"").to_string(),
            r#"[label="say \"hi\""]"#
        );
    }

    #[test]
    fn test_merge_overrides_in_place() {
        let base = AttributeBuilder::new().shape("box").color("black");
        let merged = base.merge(&AttributeBuilder::new().color("red").style("dashed"));
        assert_eq!(
            merged.to_string(),
            r#"[shape="box",color="red",style="dashed"]"#
        );
    }
}
