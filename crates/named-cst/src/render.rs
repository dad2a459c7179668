//! Rendering of node lists back to text

use crate::node::{File, Node, Statement};

/// Layout used for statements that were built rather than parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    /// One level of indentation inside a block
    pub indent: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
        }
    }
}

impl RenderStyle {
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }
}

impl File {
    /// Render with the default style.
    pub fn render(&self) -> String {
        self.render_with(&RenderStyle::default())
    }

    /// Render every node in order.
    ///
    /// Raw fragments and parsed statements are written verbatim. Built
    /// statements start on a fresh line and are followed by a newline.
    pub fn render_with(&self, style: &RenderStyle) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Raw(raw) => out.push_str(&raw.text),
                Node::Statement(stmt) => match stmt.source() {
                    Some(source) => out.push_str(source),
                    None => {
                        if !out.is_empty() && !out.ends_with('\n') {
                            out.push('\n');
                        }
                        stmt.write_canonical(&mut out, style, 0);
                        out.push('\n');
                    }
                },
            }
        }
        out
    }
}

impl Statement {
    /// Render this statement alone, terminator included.
    pub fn render(&self, style: &RenderStyle) -> String {
        match self.source() {
            Some(source) => source.to_string(),
            None => {
                let mut out = String::new();
                self.write_canonical(&mut out, style, 0);
                out
            }
        }
    }

    fn write_canonical(&self, out: &mut String, style: &RenderStyle, depth: usize) {
        push_indent(out, style, depth);
        if let Some(source) = self.source() {
            out.push_str(source);
            return;
        }

        out.push_str(self.keyword());
        if !self.header().is_empty() {
            if !self.keyword().is_empty() {
                out.push(' ');
            }
            out.push_str(self.header());
        }
        if let Some(body) = self.body() {
            out.push_str(" {\n");
            for child in body {
                match child {
                    Node::Statement(stmt) => {
                        stmt.write_canonical(out, style, depth + 1);
                        out.push('\n');
                    }
                    Node::Raw(raw) if !raw.is_blank() => {
                        push_indent(out, style, depth + 1);
                        out.push_str(raw.text.trim());
                        out.push('\n');
                    }
                    Node::Raw(_) => {}
                }
            }
            push_indent(out, style, depth);
            out.push('}');
            if !self.tail().is_empty() {
                out.push(' ');
                out.push_str(self.tail());
            }
        }
        out.push(';');
    }
}

fn push_indent(out: &mut String, style: &RenderStyle, depth: usize) {
    for _ in 0..depth {
        out.push_str(&style.indent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Raw;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_built_statement_starts_on_fresh_line() {
        let file = File::new(vec![
            Node::Raw(Raw::new("// head")),
            Node::Statement(Statement::simple("include \"a.conf\"")),
        ]);
        assert_eq!(file.render(), "// head\ninclude \"a.conf\";\n");
    }

    #[test]
    fn test_nested_canonical_layout() {
        let view = Statement::block(
            "view \"lan\"",
            vec![
                Statement::simple("recursion yes").into(),
                Statement::block("zone \"a\"", vec![Statement::simple("type hint").into()]).into(),
            ],
        );
        let file = File::new(vec![view.into()]);
        assert_eq!(
            file.render_with(&RenderStyle::with_indent("    ")),
            "view \"lan\" {\n    recursion yes;\n    zone \"a\" {\n        type hint;\n    };\n};\n"
        );
    }
}
