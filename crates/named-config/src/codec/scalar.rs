//! Boolean, integer, word and string-list tokens

use std::str::FromStr;

use super::{quote, split_top_level, strip_braces, trim_quotes};

/// `yes`/`no` (any case) from the first word; anything else is absent.
pub fn decode_bool(text: &str) -> Option<bool> {
    match text.split_whitespace().next()?.to_ascii_lowercase().as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

pub fn encode_bool(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Base-10 integer from the first word; non-numeric is absent.
pub fn decode_int<T: FromStr>(text: &str) -> Option<T> {
    text.split_whitespace().next()?.parse().ok()
}

/// First word of a single-keyword option such as `forward only`.
///
/// Anything after the first word is dropped.
pub fn decode_word(keyword: &str, text: &str) -> Option<String> {
    let mut words = text.split_whitespace();
    let word = words.next()?;
    let rest: Vec<&str> = words.collect();
    if !rest.is_empty() {
        tracing::debug!(keyword, dropped = %rest.join(" "), "Dropped trailing tokens");
    }
    Some(word.to_string())
}

/// `{ "a"; b; }` or `a; b` into its unquoted elements.
pub fn decode_string_list(text: &str) -> Vec<String> {
    split_top_level(strip_braces(text))
        .into_iter()
        .map(|item| trim_quotes(item).to_string())
        .collect()
}

/// `{ "a"; "b"; }`, or `{ }` when empty.
pub fn encode_string_list(items: &[String]) -> String {
    if items.is_empty() {
        return "{ }".to_string();
    }
    let mut out = String::from("{");
    for item in items {
        out.push(' ');
        out.push_str(&quote(item));
        out.push(';');
    }
    out.push_str(" }");
    out
}

pub fn decode_quoted(text: &str) -> String {
    trim_quotes(text).to_string()
}

pub fn encode_quoted(text: &str) -> String {
    quote(text)
}
