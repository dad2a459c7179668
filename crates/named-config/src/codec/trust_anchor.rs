//! `trust-anchors` entries
//!
//! ```text
//! "." initial-key 257 3 8 "AwEAAaz/tAm8yTn4Mfeh...";
//! "example." static-ds 12345 8 2 "49FD46E6C4B45C55D4AC...";
//! ```
//!
//! Everything after the name decides the record kind: text containing `ds`
//! is a DS record, otherwise text containing `key` is a DNSKEY. Entries with
//! neither are not decoded. The match is case-sensitive and not limited to
//! the anchor type word, so key material spelling `ds` makes a DS record.

use crate::model::{AnchorRecord, TrustAnchor};

use super::{quote, tokens, trim_quotes};

/// Decode one entry, `None` when the anchor type is not recognized.
pub fn decode_entry(text: &str) -> Option<TrustAnchor> {
    let text = text.trim();
    let name = *tokens(text).first()?;
    let rest = text[name.len()..].trim();

    let record = if rest.contains("ds") {
        AnchorRecord::Ds(rest.to_string())
    } else if rest.contains("key") {
        AnchorRecord::DnsKey(rest.to_string())
    } else {
        tracing::debug!(entry = text, "Dropped unrecognized trust anchor");
        return None;
    };

    Some(TrustAnchor {
        name: trim_quotes(name).to_string(),
        record,
    })
}

/// `"name" <record text>`
pub fn encode_entry(anchor: &TrustAnchor) -> String {
    format!("{} {}", quote(&anchor.name), anchor.record.text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_kind_from_entry_text() {
        let key = decode_entry(r#""." initial-key 257 3 8 "AwEAAaz""#).unwrap();
        assert_eq!(key.name, ".");
        assert_eq!(key.record, AnchorRecord::DnsKey(r#"initial-key 257 3 8 "AwEAAaz""#.into()));

        let ds = decode_entry(r#""example." static-ds 12345 8 2 "49FD""#).unwrap();
        assert_eq!(ds.record, AnchorRecord::Ds(r#"static-ds 12345 8 2 "49FD""#.into()));
        assert_eq!(encode_entry(&ds), r#""example." static-ds 12345 8 2 "49FD""#);
    }

    #[test]
    fn test_ds_anywhere_in_entry_wins() {
        let anchor = decode_entry(r#""." initial-key 257 3 8 "AwEAAds""#).unwrap();
        assert_eq!(anchor.record, AnchorRecord::Ds(r#"initial-key 257 3 8 "AwEAAds""#.into()));

        let upper = decode_entry(r#""." INITIAL-KEY 257 3 8 "AwEAA""#);
        assert_eq!(upper, None);
    }

    #[test]
    fn test_unknown_anchor_type_dropped() {
        assert_eq!(decode_entry(r#""." managed 257 3 8 "AwEAA""#), None);
        assert_eq!(decode_entry(""), None);
    }
}
