//! `rrset-order` rules
//!
//! ```text
//! { class IN type A name "example.com" order random; order cyclic; }
//! ```

use crate::model::RrsetOrder;

use super::{quote, split_top_level, strip_braces, tokens, trim_quotes};

pub fn decode(text: &str) -> Vec<RrsetOrder> {
    split_top_level(strip_braces(text))
        .into_iter()
        .map(decode_rule)
        .collect()
}

/// One rule; without an `order` keyword the last token is the policy.
pub fn decode_rule(entry: &str) -> RrsetOrder {
    let words = tokens(entry);
    let mut rule = RrsetOrder::default();

    let mut iter = words.iter();
    while let Some(&word) = iter.next() {
        match word {
            "class" => rule.class = iter.next().map(|v| v.to_string()),
            "type" => rule.rrtype = iter.next().map(|v| v.to_string()),
            "name" => rule.name = iter.next().map(|v| trim_quotes(v).to_string()),
            "order" => rule.order = iter.next().map(|v| v.to_string()).unwrap_or_default(),
            _ => {}
        }
    }

    if rule.order.is_empty() {
        if let Some(last) = words.last() {
            tracing::debug!(rule = entry, "rrset-order rule without order keyword");
            rule.order = last.to_string();
        }
    }
    rule
}

pub fn encode_rule(rule: &RrsetOrder) -> String {
    let mut parts = Vec::new();
    if let Some(class) = &rule.class {
        parts.push(format!("class {class}"));
    }
    if let Some(rrtype) = &rule.rrtype {
        parts.push(format!("type {rrtype}"));
    }
    if let Some(name) = &rule.name {
        parts.push(format!("name {}", quote(name)));
    }
    parts.push(format!("order {}", rule.order));
    parts.join(" ")
}

/// `{ rule; rule; }`
pub fn encode(rules: &[RrsetOrder]) -> String {
    let mut out = String::from("{");
    for rule in rules {
        out.push(' ');
        out.push_str(&encode_rule(rule));
        out.push(';');
    }
    out.push_str(" }");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_rules() {
        let rules = decode(r#"{ class IN type A name "example.com" order random; order cyclic; }"#);
        assert_eq!(
            rules,
            vec![
                RrsetOrder {
                    class: Some("IN".into()),
                    rrtype: Some("A".into()),
                    name: Some("example.com".into()),
                    order: "random".into(),
                },
                RrsetOrder {
                    order: "cyclic".into(),
                    ..RrsetOrder::default()
                },
            ]
        );
        assert_eq!(
            encode(&rules),
            r#"{ class IN type A name "example.com" order random; order cyclic; }"#
        );
    }

    #[test]
    fn test_missing_order_keyword_uses_last_token() {
        let rule = decode_rule("type MX fixed");
        assert_eq!(rule.rrtype.as_deref(), Some("MX"));
        assert_eq!(rule.order, "fixed");
    }
}
