//! Forwarder lists and remote-server lists
//!
//! ```text
//! forwarders { 192.0.2.53 port 853 tls "dot"; 198.51.100.53; };
//! primaries { 192.0.2.1 port 5353 key "xfer" tls "dot"; };
//! ```
//!
//! Each entry starts with its address; keyword/value pairs follow. Pairs the
//! entry kind does not know are dropped.

use crate::model::{Forwarder, RemoteServerItem};

use super::{quote, scalar, split_top_level, strip_braces, tokens, trim_quotes};

pub fn decode_forwarders(text: &str) -> Vec<Forwarder> {
    split_top_level(strip_braces(text))
        .into_iter()
        .filter_map(decode_forwarder)
        .collect()
}

/// `address [port n] [tls name]`
pub fn decode_forwarder(entry: &str) -> Option<Forwarder> {
    let words = tokens(entry);
    let (address, rest) = words.split_first()?;
    let mut forwarder = Forwarder::new(*address);

    let mut iter = rest.iter();
    while let Some(&word) = iter.next() {
        match word {
            "port" => forwarder.port = iter.next().and_then(|v| scalar::decode_int(v)),
            "tls" => forwarder.tls = iter.next().map(|v| trim_quotes(v).to_string()),
            other => dropped("forwarder", &forwarder.address, other),
        }
    }
    Some(forwarder)
}

pub fn encode_forwarder(forwarder: &Forwarder) -> String {
    let mut out = forwarder.address.clone();
    if let Some(port) = forwarder.port {
        out.push_str(&format!(" port {port}"));
    }
    if let Some(tls) = &forwarder.tls {
        out.push_str(&format!(" tls {}", quote(tls)));
    }
    out
}

pub fn encode_forwarders(forwarders: &[Forwarder]) -> String {
    wrap(forwarders.iter().map(encode_forwarder))
}

/// `address [port n] [key name] [tls name]`
pub fn decode_remote_item(entry: &str) -> Option<RemoteServerItem> {
    let words = tokens(entry);
    let (address, rest) = words.split_first()?;
    let mut item = RemoteServerItem::new(*address);

    let mut iter = rest.iter();
    while let Some(&word) = iter.next() {
        match word {
            "port" => item.port = iter.next().and_then(|v| scalar::decode_int(v)),
            "key" => item.key = iter.next().map(|v| trim_quotes(v).to_string()),
            "tls" => item.tls = iter.next().map(|v| trim_quotes(v).to_string()),
            other => dropped("remote server", &item.address, other),
        }
    }
    Some(item)
}

pub fn encode_remote_item(item: &RemoteServerItem) -> String {
    let mut out = item.address.clone();
    if let Some(port) = item.port {
        out.push_str(&format!(" port {port}"));
    }
    if let Some(key) = &item.key {
        out.push_str(&format!(" key {}", quote(key)));
    }
    if let Some(tls) = &item.tls {
        out.push_str(&format!(" tls {}", quote(tls)));
    }
    out
}

pub fn decode_remote_list(text: &str) -> Vec<RemoteServerItem> {
    split_top_level(strip_braces(text))
        .into_iter()
        .filter_map(decode_remote_item)
        .collect()
}

pub fn encode_remote_list(items: &[RemoteServerItem]) -> String {
    wrap(items.iter().map(encode_remote_item))
}

fn wrap(entries: impl Iterator<Item = String>) -> String {
    let mut out = String::from("{");
    for entry in entries {
        out.push(' ');
        out.push_str(&entry);
        out.push(';');
    }
    out.push_str(" }");
    out
}

fn dropped(kind: &str, address: &str, token: &str) {
    tracing::debug!(kind, address, token, "Dropped unknown server token");
}
