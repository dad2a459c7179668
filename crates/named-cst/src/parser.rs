//! Lossless parser for named.conf text.
//!
//! The parser splits text into statements and raw fragments. A statement runs
//! from its keyword to the `;` that closes it at brace depth zero; everything
//! between statements (whitespace, comments, stray semicolons) becomes a raw
//! fragment. The first top-level brace group of a statement is parsed again,
//! recursively, as its body.
//!
//! Concatenating the source of every node reproduces the input exactly.

use crate::error::{Error, Result};
use crate::lexer::{CommentKind, block_comment_end, comment_at, line_end, string_end, strip_comments};
use crate::node::{File, Node, Raw, Statement};

/// Parse configuration text into a [`File`].
///
/// # Errors
///
/// Returns [`Error::Parse`] for unterminated strings or block comments,
/// unbalanced closing braces, and top-level statements missing their `;`.
///
/// # Example
///
/// ```
/// use named_cst::parse;
///
/// let source = "// resolver\noptions {\n\trecursion yes;\n};\n";
/// let file = parse(source).unwrap();
/// assert_eq!(file.statements().count(), 1);
/// assert_eq!(file.render(), source);
/// ```
pub fn parse(source: &str) -> Result<File> {
    let nodes = Scanner::new(source, 1, Mode::Strict).nodes()?;
    tracing::trace!(nodes = nodes.len(), "Parsed configuration");
    Ok(File::new(nodes))
}

/// How to treat a trailing statement that never reaches its `;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Top level: report an error
    Strict,
    /// Inside a body: keep the fragment as raw text
    Lenient,
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    first_line: usize,
    mode: Mode,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str, first_line: usize, mode: Mode) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            first_line,
            mode,
        }
    }

    fn line_at(&self, pos: usize) -> usize {
        self.first_line + self.bytes[..pos].iter().filter(|&&b| b == b'\n').count()
    }

    fn nodes(mut self) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();

        while self.pos < self.bytes.len() {
            let start = self.pos;
            self.skip_trivia()?;
            if self.pos > start {
                nodes.push(Node::Raw(Raw::new(&self.src[start..self.pos])));
            }
            if self.pos >= self.bytes.len() {
                break;
            }
            if self.bytes[self.pos] == b'}' {
                return Err(Error::parse(self.line_at(self.pos), "unbalanced '}'"));
            }

            let start = self.pos;
            match self.statement() {
                Ok(stmt) => nodes.push(Node::Statement(stmt)),
                Err(Error::Parse { .. }) if self.mode == Mode::Lenient => {
                    nodes.push(Node::Raw(Raw::new(&self.src[start..])));
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(nodes)
    }

    /// Skip whitespace, comments and stray semicolons.
    fn skip_trivia(&mut self) -> Result<()> {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b.is_ascii_whitespace() || b == b';' {
                self.pos += 1;
                continue;
            }
            match comment_at(self.bytes, self.pos) {
                Some(kind) => self.skip_comment(kind)?,
                None => break,
            }
        }
        Ok(())
    }

    fn skip_comment(&mut self, kind: CommentKind) -> Result<()> {
        self.pos = match kind {
            CommentKind::Line => line_end(self.bytes, self.pos),
            CommentKind::Block => block_comment_end(self.bytes, self.pos).ok_or_else(|| {
                Error::parse(self.line_at(self.pos), "unterminated block comment")
            })?,
        };
        Ok(())
    }

    fn skip_string(&mut self) -> Result<()> {
        self.pos = string_end(self.bytes, self.pos)
            .ok_or_else(|| Error::parse(self.line_at(self.pos), "unterminated string"))?;
        Ok(())
    }

    fn statement(&mut self) -> Result<Statement> {
        let start = self.pos;

        if self.bytes[self.pos] == b'"' {
            self.skip_string()?;
        } else {
            while self.pos < self.bytes.len() {
                let b = self.bytes[self.pos];
                if b.is_ascii_whitespace()
                    || matches!(b, b'{' | b';' | b'"')
                    || comment_at(self.bytes, self.pos).is_some()
                {
                    break;
                }
                self.pos += 1;
            }
        }
        let keyword_end = self.pos;

        let mut depth = 0usize;
        let mut body_range: Option<(usize, Option<usize>)> = None;

        loop {
            if self.pos >= self.bytes.len() {
                return Err(Error::parse(
                    self.line_at(start),
                    format!(
                        "statement '{}' is missing a terminating ';'",
                        &self.src[start..keyword_end]
                    ),
                ));
            }
            match self.bytes[self.pos] {
                b'"' => {
                    self.skip_string()?;
                    continue;
                }
                b'{' => {
                    if depth == 0 && body_range.is_none() {
                        body_range = Some((self.pos, None));
                    }
                    depth += 1;
                }
                b'}' => {
                    if depth == 0 {
                        return Err(Error::parse(self.line_at(self.pos), "unbalanced '}'"));
                    }
                    depth -= 1;
                    if depth == 0 {
                        if let Some((open, None)) = body_range {
                            body_range = Some((open, Some(self.pos)));
                        }
                    }
                }
                b';' if depth == 0 => {
                    self.pos += 1;
                    break;
                }
                _ => {
                    if let Some(kind) = comment_at(self.bytes, self.pos) {
                        self.skip_comment(kind)?;
                        continue;
                    }
                }
            }
            self.pos += 1;
        }

        let end = self.pos;
        let terminator = end - 1;
        let keyword = self.src[start..keyword_end].to_string();
        let source = self.src[start..end].to_string();

        let (header, body, tail) = match body_range {
            Some((open, Some(close))) => {
                let inner = &self.src[open + 1..close];
                let body =
                    Scanner::new(inner, self.line_at(open + 1), Mode::Lenient).nodes()?;
                (
                    clean(&self.src[keyword_end..open]),
                    Some(body),
                    clean(&self.src[close + 1..terminator]),
                )
            }
            _ => (clean(&self.src[keyword_end..terminator]), None, String::new()),
        };

        Ok(Statement::parsed(keyword, header, body, tail, source))
    }
}

fn clean(text: &str) -> String {
    strip_comments(text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_statement() {
        let file = parse("include \"/etc/bind/zones.conf\";\n").unwrap();
        assert_eq!(file.nodes.len(), 2);
        let stmt = file.nodes[0].as_statement().unwrap();
        assert_eq!(stmt.keyword(), "include");
        assert_eq!(stmt.header(), "\"/etc/bind/zones.conf\"");
        assert!(stmt.body().is_none());
    }

    #[test]
    fn test_parse_nested_body() {
        let file = parse("view \"inside\" IN { zone \"a\" { type hint; }; };").unwrap();
        let view = file.nodes[0].as_statement().unwrap();
        assert_eq!(view.header(), "\"inside\" IN");
        let zone = view.children().next().unwrap();
        assert_eq!(zone.keyword(), "zone");
        assert_eq!(zone.children().next().unwrap().value(), "hint");
    }

    #[test]
    fn test_parse_tail_after_body() {
        let file = parse("inet 127.0.0.1 allow { localhost; } keys { \"rndc\"; };").unwrap();
        let stmt = file.nodes[0].as_statement().unwrap();
        assert_eq!(stmt.header(), "127.0.0.1 allow");
        assert_eq!(stmt.tail(), "keys { \"rndc\"; }");
    }

    #[test]
    fn test_missing_terminator_is_error() {
        let err = parse("options {\n};\nrecursion yes").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn test_unbalanced_brace_is_error() {
        let err = parse("};").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_unterminated_body_statement_kept_raw() {
        let file = parse("acl x { 10.0.0.1; any };").unwrap();
        let acl = file.nodes[0].as_statement().unwrap();
        let body = acl.body().unwrap();
        assert!(matches!(body.last(), Some(Node::Raw(raw)) if raw.text.contains("any")));
    }
}
