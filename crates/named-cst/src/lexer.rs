//! Lexical helpers shared by the parser and the statement accessors.
//!
//! named.conf has three comment styles (`//`, `#`, `/* */`) and double-quoted
//! strings with backslash escapes. Everything else that matters structurally
//! is a single ASCII byte (`{`, `}`, `;`), so the scanners work on bytes and
//! only ever slice at ASCII positions.

/// Index just past the closing quote of the string starting at `start`,
/// or `None` when the string is unterminated.
pub(crate) fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return Some(pos + 1),
            _ => pos += 1,
        }
    }
    None
}

/// Index of the newline ending the line comment at `start` (not consumed),
/// or the end of input.
pub(crate) fn line_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |offset| start + offset)
}

/// Index just past the `*/` closing the block comment at `start`.
pub(crate) fn block_comment_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start + 2;
    while pos + 1 < bytes.len() {
        if bytes[pos] == b'*' && bytes[pos + 1] == b'/' {
            return Some(pos + 2);
        }
        pos += 1;
    }
    None
}

/// What kind of comment, if any, starts at `pos`.
pub(crate) fn comment_at(bytes: &[u8], pos: usize) -> Option<CommentKind> {
    match bytes.get(pos)? {
        b'#' => Some(CommentKind::Line),
        b'/' => match bytes.get(pos + 1) {
            Some(b'/') => Some(CommentKind::Line),
            Some(b'*') => Some(CommentKind::Block),
            _ => None,
        },
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommentKind {
    Line,
    Block,
}

/// Remove every comment outside quoted strings.
///
/// Line comments keep their newline, block comments collapse to one space so
/// that neighbouring tokens stay separated. Unterminated constructs run to the
/// end of input.
pub fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut copied = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'"' {
            pos = string_end(bytes, pos).unwrap_or(bytes.len());
            continue;
        }
        match comment_at(bytes, pos) {
            Some(CommentKind::Line) => {
                out.push_str(&text[copied..pos]);
                pos = line_end(bytes, pos);
                copied = pos;
            }
            Some(CommentKind::Block) => {
                out.push_str(&text[copied..pos]);
                out.push(' ');
                pos = block_comment_end(bytes, pos).unwrap_or(bytes.len());
                copied = pos;
            }
            None => pos += 1,
        }
    }

    out.push_str(&text[copied..]);
    out
}

/// Byte range of the first top-level `{ ... }` group, braces included.
///
/// Quoted strings are skipped. Returns `None` when there is no group or it is
/// never closed.
pub fn find_group(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut depth = 0usize;
    let mut open = None;

    while pos < bytes.len() {
        match bytes[pos] {
            b'"' => {
                pos = string_end(bytes, pos).unwrap_or(bytes.len());
                continue;
            }
            b'{' => {
                if depth == 0 {
                    open = Some(pos);
                }
                depth += 1;
            }
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return open.map(|start| (start, pos + 1));
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}
