//! Sub-grammar codecs
//!
//! Each submodule pairs a decoder and an encoder for one micro-grammar found
//! inside statement bodies. Decoders take the statement value (keyword and
//! terminator already removed) and never fail: malformed input decodes to an
//! empty or absent value, and the dropped text is reported at `debug` level.
//! Encoders produce the canonical text form that decodes back to the same
//! value.

pub mod control;
pub mod listen;
pub mod match_list;
pub mod rrset_order;
pub mod scalar;
pub mod servers;
pub mod trust_anchor;

/// Trim whitespace, then any surrounding double quotes.
pub fn trim_quotes(text: &str) -> &str {
    text.trim().trim_matches('"')
}

/// Wrap in double quotes.
pub fn quote(text: &str) -> String {
    format!("\"{text}\"")
}

/// True for names that can be written without quotes.
pub fn is_bare(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Quote unless [`is_bare`].
pub fn quote_if_needed(text: &str) -> String {
    if is_bare(text) {
        text.to_string()
    } else {
        quote(text)
    }
}

/// Remove one optional pair of enclosing braces.
pub fn strip_braces(text: &str) -> &str {
    let text = text.trim();
    match text.strip_prefix('{') {
        Some(inner) => inner.strip_suffix('}').unwrap_or(inner).trim(),
        None => text,
    }
}

/// Split on `;` outside quotes and nested braces.
///
/// Segments are trimmed; empty segments are skipped.
pub fn split_top_level(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'"' => {
                pos = quoted_end(bytes, pos);
                continue;
            }
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => {
                push_segment(&mut out, &text[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
        pos += 1;
    }
    push_segment(&mut out, &text[start..]);
    out
}

fn push_segment<'a>(out: &mut Vec<&'a str>, segment: &'a str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        out.push(segment);
    }
}

/// Split into whitespace-separated tokens.
///
/// A quoted string or a `{ ... }` group is one token even when it contains
/// whitespace. A `;` outside a group ends the current token and is dropped.
pub fn tokens(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        if b.is_ascii_whitespace() || b == b';' {
            pos += 1;
            continue;
        }

        let start = pos;
        if b == b'{' {
            let mut depth = 0usize;
            while pos < bytes.len() {
                match bytes[pos] {
                    b'"' => {
                        pos = quoted_end(bytes, pos);
                        continue;
                    }
                    b'{' => depth += 1,
                    b'}' => {
                        depth -= 1;
                        if depth == 0 {
                            pos += 1;
                            break;
                        }
                    }
                    _ => {}
                }
                pos += 1;
            }
        } else {
            while pos < bytes.len() {
                match bytes[pos] {
                    b'"' => {
                        pos = quoted_end(bytes, pos);
                        continue;
                    }
                    b'{' | b';' => break,
                    c if c.is_ascii_whitespace() => break,
                    _ => pos += 1,
                }
            }
        }
        out.push(&text[start..pos]);
    }
    out
}

/// Index just past the closing quote, or the end of input.
fn quoted_end(bytes: &[u8], start: usize) -> usize {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_top_level_respects_nesting() {
        assert_eq!(
            split_top_level(" a; { b; c; }; \"d;e\" ;; "),
            vec!["a", "{ b; c; }", "\"d;e\""]
        );
    }

    #[test]
    fn test_tokens_groups_and_strings() {
        assert_eq!(
            tokens(r#"127.0.0.1 port 953 allow { localhost; } keys { "rndc key"; }"#),
            vec![
                "127.0.0.1",
                "port",
                "953",
                "allow",
                "{ localhost; }",
                "keys",
                r#"{ "rndc key"; }"#
            ]
        );
        assert_eq!(tokens(r#""/run/x sock" perm 0600"#), vec![r#""/run/x sock""#, "perm", "0600"]);
    }

    #[test]
    fn test_tokens_unclosed_group_runs_to_end() {
        assert_eq!(tokens("allow { a;"), vec!["allow", "{ a;"]);
    }

    #[test]
    fn test_strip_braces() {
        assert_eq!(strip_braces(" { a; b; } "), "a; b;");
        assert_eq!(strip_braces("a; b;"), "a; b;");
        assert_eq!(strip_braces("{ a;"), "a;");
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("trusted-nets"), "trusted-nets");
        assert_eq!(quote_if_needed("my.acl"), "\"my.acl\"");
        assert_eq!(quote_if_needed(""), "\"\"");
    }
}
