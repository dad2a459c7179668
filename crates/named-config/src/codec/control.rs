//! `controls` channel descriptors
//!
//! ```text
//! inet 127.0.0.1 port 953 allow { localhost; } keys { "rndc-key"; } read-only no;
//! unix "/run/named/control" perm 0600 owner 0 group 0 keys { "rndc-key"; };
//! ```
//!
//! Decoding walks the tokens left to right and only treats a token as a
//! keyword when it stands alone, so a list element that happens to be
//! spelled `allow` or `keys` stays a list element.

use crate::model::{ControlInet, ControlUnix};

use super::{match_list, quote, scalar, tokens, trim_quotes};

/// Decode the arguments of an `inet` channel (the word `inet` removed).
pub fn decode_inet(text: &str) -> ControlInet {
    let words = tokens(text);
    let Some((address, rest)) = words.split_first() else {
        return ControlInet::default();
    };
    let mut inet = ControlInet {
        address: address.to_string(),
        ..ControlInet::default()
    };

    let mut iter = rest.iter();
    while let Some(&word) = iter.next() {
        match word {
            "port" => inet.port = iter.next().and_then(|v| scalar::decode_int(v)),
            "allow" => inet.allow = iter.next().map(|v| match_list::decode(v)).unwrap_or_default(),
            "keys" => inet.keys = iter.next().map(|v| scalar::decode_string_list(v)).unwrap_or_default(),
            "read-only" => inet.read_only = iter.next().and_then(|v| scalar::decode_bool(v)),
            other => tracing::debug!(channel = "inet", token = other, "Dropped unknown control token"),
        }
    }
    inet
}

/// `inet address [port n] allow { ... } [keys { ... }] [read-only yes|no]`
pub fn encode_inet(inet: &ControlInet) -> String {
    let mut out = format!("inet {}", inet.address);
    if let Some(port) = inet.port {
        out.push_str(&format!(" port {port}"));
    }
    out.push_str(" allow ");
    out.push_str(&match_list::encode(&inet.allow));
    push_keys_and_mode(&mut out, &inet.keys, inet.read_only);
    out
}

/// Decode the arguments of a `unix` channel (the word `unix` removed).
pub fn decode_unix(text: &str) -> ControlUnix {
    let words = tokens(text);
    let Some((path, rest)) = words.split_first() else {
        return ControlUnix::default();
    };
    let mut unix = ControlUnix {
        path: trim_quotes(path).to_string(),
        ..ControlUnix::default()
    };

    let mut iter = rest.iter();
    while let Some(&word) = iter.next() {
        match word {
            "perm" => unix.perm = iter.next().map(|v| v.to_string()).unwrap_or_default(),
            "owner" => unix.owner = iter.next().and_then(|v| scalar::decode_int(v)).unwrap_or_default(),
            "group" => unix.group = iter.next().and_then(|v| scalar::decode_int(v)).unwrap_or_default(),
            "keys" => unix.keys = iter.next().map(|v| scalar::decode_string_list(v)).unwrap_or_default(),
            "read-only" => unix.read_only = iter.next().and_then(|v| scalar::decode_bool(v)),
            other => tracing::debug!(channel = "unix", token = other, "Dropped unknown control token"),
        }
    }
    unix
}

/// `unix "path" perm nnnn owner n group n [keys { ... }] [read-only yes|no]`
pub fn encode_unix(unix: &ControlUnix) -> String {
    let mut out = format!("unix {}", quote(&unix.path));
    if !unix.perm.is_empty() {
        out.push_str(&format!(" perm {}", unix.perm));
    }
    out.push_str(&format!(" owner {} group {}", unix.owner, unix.group));
    push_keys_and_mode(&mut out, &unix.keys, unix.read_only);
    out
}

fn push_keys_and_mode(out: &mut String, keys: &[String], read_only: Option<bool>) {
    if !keys.is_empty() {
        out.push_str(" keys ");
        out.push_str(&scalar::encode_string_list(keys));
    }
    if let Some(read_only) = read_only {
        out.push_str(" read-only ");
        out.push_str(scalar::encode_bool(read_only));
    }
}
