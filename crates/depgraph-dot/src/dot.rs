//! Low level DOT text emission.

use std::fmt::Write;

use depgraph_core::{AttributeBuilder, escape_label};

/// Write indentation to output.
pub fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// Quote and escape a node identifier.
pub fn quote_id(id: &str) -> String {
    format!("\"{}\"", escape_label(id))
}

/// Appends DOT statements to a `digraph` body.
pub struct DotWriter {
    output: String,
    indent: usize,
}

impl DotWriter {
    /// Open `digraph "name" {`.
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {} {{", quote_id(name));
        Self { output, indent: 1 }
    }

    /// Graph wide default attributes, e.g. `node [shape="box"]`. Skipped when empty.
    pub fn defaults(&mut self, kind: &str, attributes: &AttributeBuilder) -> &mut Self {
        if attributes.is_empty() {
            return self;
        }
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{kind} {attributes}");
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    pub fn comment(&mut self, text: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "// {text}");
        self
    }

    pub fn node(&mut self, id: &str, attributes: &AttributeBuilder) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}{}", quote_id(id), attributes);
        self
    }

    pub fn edge(&mut self, from: &str, to: &str, attributes: &AttributeBuilder) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{} -> {}{}", quote_id(from), quote_id(to), attributes);
        self
    }

    /// Close the graph and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}
