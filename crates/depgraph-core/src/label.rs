//! HTML-like node labels built from independently styled segments.

use std::fmt::Write;

/// Font settings of one label segment. Unset fields emit nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentFont<'a> {
    pub name: Option<&'a str>,
    pub color: Option<&'a str>,
    pub size: Option<u32>,
}

impl SegmentFont<'_> {
    fn is_plain(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.size.is_none_or(|s| s == 0)
    }
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Builds `<seg1<br/>seg2...>` labels.
///
/// Empty segments are dropped together with their line break, so a label
/// with a suppressed version reads `group<br/>artifact` rather than leaving
/// an empty line.
#[derive(Debug, Clone, Default)]
pub struct LabelBuilder {
    segments: Vec<String>,
}

impl LabelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment(mut self, text: Option<&str>, font: SegmentFont<'_>) -> Self {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return self;
        };

        let text = escape_html(text);
        if font.is_plain() {
            self.segments.push(text);
            return self;
        }

        let mut out = String::from("<font");
        if let Some(name) = font.name {
            let _ = write!(out, " face=\"{}\"", escape_html(name));
        }
        if let Some(color) = font.color {
            let _ = write!(out, " color=\"{}\"", escape_html(color));
        }
        if let Some(size) = font.size.filter(|s| *s > 0) {
            let _ = write!(out, " point-size=\"{size}\"");
        }
        let _ = write!(out, ">{text}</font>");
        self.segments.push(out);
        self
    }

    /// The finished label, or an empty string when every segment was empty.
    pub fn build(self) -> String {
        if self.segments.is_empty() {
            return String::new();
        }
        format!("<{}>", self.segments.join("<br/>"))
    }
}
