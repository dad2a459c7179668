//! `listen-on` / `listen-on-v6` clauses
//!
//! ```text
//! port 853 tls "local-tls" http "doh" { 192.0.2.1; }
//! ```

use named_cst::find_group;

use crate::model::Listen;

use super::{match_list, quote, scalar, tokens, trim_quotes};

/// Leading keyword pairs may come in any order before the address list.
pub fn decode(text: &str) -> Listen {
    let (prefix, addrs) = match find_group(text) {
        Some((start, end)) => (&text[..start], match_list::decode(&text[start..end])),
        None => (text, Vec::new()),
    };

    let mut listen = Listen {
        addrs,
        ..Listen::default()
    };
    let words = tokens(prefix);
    let mut iter = words.iter();
    while let Some(&word) = iter.next() {
        match word {
            "port" => listen.port = iter.next().and_then(|v| scalar::decode_int(v)),
            "tls" => listen.tls = iter.next().map(|v| trim_quotes(v).to_string()),
            "http" => listen.http = iter.next().map(|v| trim_quotes(v).to_string()),
            other => tracing::debug!(token = other, "Dropped unknown listen token"),
        }
    }
    listen
}

/// `[port n] [tls "name"] [http "name"] { ... }`
pub fn encode(listen: &Listen) -> String {
    let mut out = String::new();
    if let Some(port) = listen.port {
        out.push_str(&format!("port {port} "));
    }
    if let Some(tls) = &listen.tls {
        out.push_str(&format!("tls {} ", quote(tls)));
    }
    if let Some(http) = &listen.http {
        out.push_str(&format!("http {} ", quote(http)));
    }
    out.push_str(&match_list::encode(&listen.addrs));
    out
}
