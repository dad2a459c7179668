//! Address match lists
//!
//! ```text
//! { 10.0.0.0/8; !bogons; key "rndc-key"; { 192.0.2.1; any; }; }
//! ```
//!
//! A segment is classified in order: a leading `!` negates the rest, `key`
//! introduces a key reference, a leading `{` opens a nested list. Anything
//! else is a literal address when it contains `/`, more than one `:`, or
//! exactly three `.`; otherwise it names an ACL.

use crate::model::{MatchKind, MatchTerm};

use super::{quote, quote_if_needed, split_top_level, strip_braces, trim_quotes};

/// Decode a list, with or without its enclosing braces.
pub fn decode(text: &str) -> Vec<MatchTerm> {
    split_top_level(strip_braces(text))
        .into_iter()
        .filter_map(decode_term)
        .collect()
}

/// Decode one `;`-free segment.
pub fn decode_term(segment: &str) -> Option<MatchTerm> {
    let segment = segment.trim();

    if let Some(rest) = segment.strip_prefix('!') {
        let rest = rest.trim_start();
        if rest.is_empty() {
            tracing::debug!("Dropped empty negated match term");
            return None;
        }
        return decode_term(rest).map(MatchTerm::negate);
    }

    if let Some(name) = key_reference(segment) {
        return Some(MatchTerm::key(trim_quotes(name)));
    }

    if segment.starts_with('{') {
        return Some(MatchTerm::nested(decode(segment)));
    }

    if is_address(segment) {
        Some(MatchTerm::address(segment))
    } else {
        Some(MatchTerm::acl(trim_quotes(segment)))
    }
}

fn key_reference(segment: &str) -> Option<&str> {
    let rest = segment.strip_prefix("key")?;
    rest.starts_with(char::is_whitespace).then_some(rest.trim())
}

fn is_address(segment: &str) -> bool {
    segment.contains('/') || segment.matches(':').count() > 1 || segment.matches('.').count() == 3
}

/// `{ a; b; }`, or `{ }` when empty.
pub fn encode(terms: &[MatchTerm]) -> String {
    if terms.is_empty() {
        return "{ }".to_string();
    }
    let mut out = String::from("{");
    for term in terms {
        out.push(' ');
        out.push_str(&encode_term(term));
        out.push(';');
    }
    out.push_str(" }");
    out
}

/// One term without its terminating `;`.
pub fn encode_term(term: &MatchTerm) -> String {
    let body = match &term.kind {
        MatchKind::Address(address) => address.clone(),
        MatchKind::Key(name) => format!("key {}", quote(name)),
        MatchKind::Acl(name) => quote_if_needed(name),
        MatchKind::Nested(terms) => encode(terms),
    };
    if term.negated {
        format!("!{body}")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::prefix("10.0.0.0/8", MatchTerm::address("10.0.0.0/8"))]
    #[case::ipv4("192.0.2.1", MatchTerm::address("192.0.2.1"))]
    #[case::ipv6("2001:db8::1", MatchTerm::address("2001:db8::1"))]
    #[case::acl("trusted", MatchTerm::acl("trusted"))]
    #[case::negated_acl("!trusted", MatchTerm::acl("trusted").negate())]
    #[case::spaced_negation("! trusted", MatchTerm::acl("trusted").negate())]
    #[case::key("key \"rndc-key\"", MatchTerm::key("rndc-key"))]
    #[case::quoted_acl("\"my acl\"", MatchTerm::acl("my acl"))]
    #[case::keyword_prefix_is_acl("keyring", MatchTerm::acl("keyring"))]
    fn test_decode_term(#[case] text: &str, #[case] expected: MatchTerm) {
        assert_eq!(decode_term(text), Some(expected));
    }

    #[test]
    fn test_decode_nested_list() {
        let terms = decode("{ { 10.0.0.0/8; !bogons; }; any; }");
        assert_eq!(
            terms,
            vec![
                MatchTerm::nested(vec![
                    MatchTerm::address("10.0.0.0/8"),
                    MatchTerm::acl("bogons").negate(),
                ]),
                MatchTerm::acl("any"),
            ]
        );
    }

    #[test]
    fn test_decode_nested_two_terms_second_negated() {
        let term = decode_term("{ 10.0.0.0/8; !bogons; }").unwrap();
        let MatchKind::Nested(inner) = term.kind else {
            panic!("expected nested list");
        };
        assert_eq!(inner.len(), 2);
        assert!(!inner[0].negated);
        assert!(inner[1].negated);
    }

    #[test]
    fn test_decode_drops_empty_negation() {
        assert_eq!(decode("{ !; any; }"), vec![MatchTerm::acl("any")]);
    }

    #[test]
    fn test_encode_canonical() {
        let terms = vec![
            MatchTerm::address("10.0.0.0/8"),
            MatchTerm::acl("bogons").negate(),
            MatchTerm::key("rndc-key"),
            MatchTerm::acl("my.acl"),
            MatchTerm::nested(vec![MatchTerm::acl("any")]).negate(),
        ];
        assert_eq!(
            encode(&terms),
            r#"{ 10.0.0.0/8; !bogons; key "rndc-key"; "my.acl"; !{ any; }; }"#
        );
        assert_eq!(decode(&encode(&terms)), terms);
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&[]), "{ }");
        assert!(decode("{ }").is_empty());
    }
}
