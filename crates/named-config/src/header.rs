//! Block header metadata: the quoted name and optional class word.

use regex::Regex;
use std::sync::LazyLock;

use crate::codec::{tokens, trim_quotes};

/// `"name"` at the start of a header.
static QUOTED_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"([^"]+)""#).expect("Invalid quoted name regex"));

/// `"name" CLASS` at the start of a header.
static QUOTED_CLASS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"[^"]+"\s+([A-Za-z]+)"#).expect("Invalid quoted class regex")
});

/// The block name, quoted or bare.
pub fn block_name(header: &str) -> String {
    let header = header.trim();
    if let Some(caps) = QUOTED_NAME_REGEX.captures(header) {
        return caps[1].to_string();
    }
    header
        .split_whitespace()
        .next()
        .map(|word| trim_quotes(word).to_string())
        .unwrap_or_default()
}

/// The class word following the name, e.g. `IN` in `"example.com" IN`.
pub fn block_class(header: &str) -> Option<String> {
    let header = header.trim();
    if let Some(caps) = QUOTED_CLASS_REGEX.captures(header) {
        return Some(caps[1].to_string());
    }
    let mut words = header.split_whitespace();
    words.next()?;
    words
        .next()
        .filter(|word| word.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_string)
}

/// Tokens after the block name.
pub fn after_name(header: &str) -> Vec<&str> {
    tokens(header).into_iter().skip(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#""example.com" IN"#, "example.com", Some("IN"))]
    #[case(r#""example.com""#, "example.com", None)]
    #[case("example.com in", "example.com", Some("in"))]
    #[case("rndc-key", "rndc-key", None)]
    #[case("", "", None)]
    fn test_name_and_class(
        #[case] header: &str,
        #[case] name: &str,
        #[case] class: Option<&str>,
    ) {
        assert_eq!(block_name(header), name);
        assert_eq!(block_class(header).as_deref(), class);
    }

    #[test]
    fn test_after_name() {
        assert_eq!(after_name(r#""primaries" port 5353"#), vec!["port", "5353"]);
    }
}
