//! Node types of the concrete syntax tree

use crate::lexer::{find_group, strip_comments};

/// One entry of an ordered node list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A `keyword args [{ body }] [tail];` statement
    Statement(Statement),
    /// Whitespace, comments, or any other fragment kept verbatim
    Raw(Raw),
}

impl Node {
    /// The statement, if this node is one.
    pub fn as_statement(&self) -> Option<&Statement> {
        match self {
            Self::Statement(stmt) => Some(stmt),
            Self::Raw(_) => None,
        }
    }

    /// Keyword of the statement, `None` for raw fragments.
    pub fn keyword(&self) -> Option<&str> {
        self.as_statement().map(Statement::keyword)
    }

    /// True for raw fragments that contain nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Raw(raw) if raw.is_blank())
    }
}

impl From<Statement> for Node {
    fn from(stmt: Statement) -> Self {
        Self::Statement(stmt)
    }
}

impl From<Raw> for Node {
    fn from(raw: Raw) -> Self {
        Self::Raw(raw)
    }
}

/// Verbatim text between statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw {
    pub text: String,
}

impl Raw {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A configuration statement.
///
/// Parsed statements remember their exact source text and render it back
/// unchanged. Built statements have no source and render canonically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    keyword: String,
    header: String,
    body: Option<Vec<Node>>,
    tail: String,
    source: Option<String>,
}

impl Statement {
    pub(crate) fn parsed(
        keyword: String,
        header: String,
        body: Option<Vec<Node>>,
        tail: String,
        source: String,
    ) -> Self {
        Self {
            keyword,
            header,
            body,
            tail,
            source: Some(source),
        }
    }

    /// Build a single-line statement from one line of text.
    ///
    /// The first word becomes the keyword; a trailing `;` is optional.
    ///
    /// ```
    /// use named_cst::Statement;
    ///
    /// let stmt = Statement::simple("allow-query { any; }");
    /// assert_eq!(stmt.keyword(), "allow-query");
    /// assert_eq!(stmt.value(), "{ any; }");
    /// ```
    pub fn simple(line: impl AsRef<str>) -> Self {
        let line = line.as_ref().trim();
        let line = line.strip_suffix(';').unwrap_or(line).trim_end();
        let (keyword, header) = split_keyword(line);
        Self {
            keyword,
            header,
            body: None,
            tail: String::new(),
            source: None,
        }
    }

    /// Build a block statement from a header line and its child nodes.
    ///
    /// ```
    /// use named_cst::{File, Node, Statement};
    ///
    /// let zone = Statement::block(
    ///     r#"zone "example.com" IN"#,
    ///     vec![Statement::simple("type primary").into()],
    /// );
    /// let file = File::new(vec![Node::Statement(zone)]);
    /// assert_eq!(
    ///     file.render(),
    ///     "zone \"example.com\" IN {\n\ttype primary;\n};\n"
    /// );
    /// ```
    pub fn block(header_line: impl AsRef<str>, body: Vec<Node>) -> Self {
        let (keyword, header) = split_keyword(header_line.as_ref().trim());
        Self {
            keyword,
            header,
            body: Some(body),
            tail: String::new(),
            source: None,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Arguments between the keyword and the body (or terminator), comments removed.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Child nodes of the first brace group, if the statement has one.
    pub fn body(&self) -> Option<&[Node]> {
        self.body.as_deref()
    }

    /// Arguments after the closing brace of the body.
    pub fn tail(&self) -> &str {
        &self.tail
    }

    /// Exact source text, terminator included, for parsed statements.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Child statements of the body, skipping raw fragments.
    pub fn children(&self) -> impl Iterator<Item = &Statement> {
        self.body
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(Node::as_statement)
    }

    /// Everything after the keyword, without the terminating `;`.
    ///
    /// Comments are removed and surrounding whitespace trimmed. This is the
    /// text the sub-grammar codecs work on.
    pub fn value(&self) -> String {
        match &self.source {
            Some(source) => {
                let rest = source.get(self.keyword.len()..).unwrap_or_default();
                let rest = rest.trim_end();
                let rest = rest.strip_suffix(';').unwrap_or(rest);
                strip_comments(rest).trim().to_string()
            }
            None => self.inline_args(),
        }
    }

    /// The whole statement on one logical line, without the terminating `;`.
    pub fn text(&self) -> String {
        let value = self.value();
        if value.is_empty() {
            self.keyword.clone()
        } else if self.keyword.is_empty() {
            value
        } else {
            format!("{} {}", self.keyword, value)
        }
    }

    /// The first top-level `{ ... }` group of the statement, braces included.
    pub fn block_text(&self) -> Option<String> {
        let value = self.value();
        find_group(&value).map(|(start, end)| value[start..end].to_string())
    }

    fn inline_args(&self) -> String {
        let mut out = self.header.clone();
        if let Some(body) = &self.body {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push('{');
            for child in body.iter().filter_map(Node::as_statement) {
                out.push(' ');
                out.push_str(&child.text());
                out.push(';');
            }
            out.push_str(" }");
        }
        if !self.tail.is_empty() {
            out.push(' ');
            out.push_str(&self.tail);
        }
        out
    }
}

/// Split `keyword rest...` at the first whitespace.
fn split_keyword(line: &str) -> (String, String) {
    if line.starts_with('"') {
        if let Some(end) = crate::lexer::string_end(line.as_bytes(), 0) {
            return (line[..end].to_string(), line[end..].trim().to_string());
        }
    }
    match line.find(|c: char| c.is_whitespace() || c == '{' || c == ';') {
        Some(idx) => (line[..idx].to_string(), line[idx..].trim().to_string()),
        None => (line.to_string(), String::new()),
    }
}

/// The root of a parsed configuration: an ordered node list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    pub nodes: Vec<Node>,
}

impl File {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Parse configuration text.
    pub fn parse(source: &str) -> crate::Result<Self> {
        crate::parser::parse(source)
    }

    /// Top-level statements, skipping raw fragments.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.nodes.iter().filter_map(Node::as_statement)
    }

    /// Top-level statements with the given keyword.
    pub fn statements_with<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a Statement> {
        self.statements().filter(move |stmt| stmt.keyword() == keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_strips_terminator() {
        let stmt = Statement::simple("  recursion no;  ");
        assert_eq!(stmt.keyword(), "recursion");
        assert_eq!(stmt.header(), "no");
        assert_eq!(stmt.value(), "no");
        assert!(stmt.source().is_none());
    }

    #[test]
    fn test_simple_quoted_keyword() {
        let stmt = Statement::simple(r#""." initial-key 257 3 8 "AwEAAa""#);
        assert_eq!(stmt.keyword(), r#"".""#);
        assert_eq!(stmt.value(), r#"initial-key 257 3 8 "AwEAAa""#);
    }

    #[test]
    fn test_built_block_value_is_inline() {
        let stmt = Statement::block(
            "acl trusted",
            vec![
                Statement::simple("10.0.0.0/8").into(),
                Statement::simple("!bogons").into(),
            ],
        );
        assert_eq!(stmt.value(), "trusted { 10.0.0.0/8; !bogons; }");
        assert_eq!(stmt.block_text().as_deref(), Some("{ 10.0.0.0/8; !bogons; }"));
    }

    #[test]
    fn test_empty_built_block() {
        let stmt = Statement::block("controls", Vec::new());
        assert_eq!(stmt.value(), "{ }");
        assert_eq!(stmt.children().count(), 0);
    }

    #[test]
    fn test_blank_raw() {
        assert!(Node::Raw(Raw::new("\n\t \n")).is_blank());
        assert!(!Node::Raw(Raw::new("// note\n")).is_blank());
        assert!(!Node::Statement(Statement::simple("x")).is_blank());
    }
}
