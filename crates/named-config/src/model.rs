//! Typed model of a named.conf configuration.
//!
//! Every record is plain data with stable camelCase field names when
//! serialized. Optional scalars are omitted when unset. Collections of a
//! record that exists are always emitted, even when empty.
//!
//! Blocks that may contain statements this model does not cover carry an
//! `other` list holding those statements verbatim.

use std::fmt;

use named_cst::{File, Statement};
use serde::{Deserialize, Serialize};

/// The root of a typed configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub includes: Vec<Include>,
    pub acls: Vec<Acl>,
    pub keys: Vec<Key>,
    pub key_stores: Vec<KeyStore>,
    pub remote_servers: Vec<RemoteServers>,
    pub tls: Vec<Tls>,
    pub http: Vec<Http>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<Controls>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
    pub trust_anchors: Vec<TrustAnchors>,
    pub views: Vec<View>,
    pub zones: Vec<Zone>,

    #[serde(skip)]
    pub(crate) origin: Origin,
}

/// The syntax tree a [`Config`] was decoded from.
///
/// Never takes part in equality: two configurations with the same typed
/// content are equal regardless of where they came from.
#[derive(Debug, Clone, Default)]
pub(crate) struct Origin(pub(crate) Option<File>);

impl PartialEq for Origin {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// `include "path";`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Include {
    pub path: String,
}

impl Include {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// A statement kept verbatim inside a modeled block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOption {
    pub name: String,
    pub raw: String,
}

impl RawOption {
    pub fn new(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw: raw.into(),
        }
    }

    pub(crate) fn from_statement(stmt: &Statement) -> Self {
        Self::new(stmt.keyword(), stmt.value())
    }

    /// The statement line, without terminator.
    pub fn line(&self) -> String {
        if self.raw.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.raw)
        }
    }
}

// ---------------------------------------------------------------------------
// Address match lists
// ---------------------------------------------------------------------------

/// One element of an address match list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTerm {
    #[serde(rename = "not", default, skip_serializing_if = "std::ops::Not::not")]
    pub negated: bool,
    #[serde(flatten)]
    pub kind: MatchKind,
}

/// What a match term refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    /// Literal address or prefix, e.g. `10.0.0.0/8`
    Address(String),
    /// `key <name>`
    Key(String),
    /// Named ACL, including the built-ins `any`, `none`, `localhost`, `localnets`
    #[serde(rename = "aclRef")]
    Acl(String),
    /// Parenthesized sub-list `{ ...; }`
    Nested(Vec<MatchTerm>),
}

impl MatchTerm {
    pub fn address(address: impl Into<String>) -> Self {
        Self::from(MatchKind::Address(address.into()))
    }

    pub fn key(name: impl Into<String>) -> Self {
        Self::from(MatchKind::Key(name.into()))
    }

    pub fn acl(name: impl Into<String>) -> Self {
        Self::from(MatchKind::Acl(name.into()))
    }

    pub fn nested(terms: Vec<MatchTerm>) -> Self {
        Self::from(MatchKind::Nested(terms))
    }

    /// The same term with negation set.
    pub fn negate(mut self) -> Self {
        self.negated = true;
        self
    }
}

impl From<MatchKind> for MatchTerm {
    fn from(kind: MatchKind) -> Self {
        Self {
            negated: false,
            kind,
        }
    }
}

/// `acl "name" { ... };`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Acl {
    pub name: String,
    pub elements: Vec<MatchTerm>,
}

// ---------------------------------------------------------------------------
// Keys, key stores, remote servers, TLS, HTTP
// ---------------------------------------------------------------------------

/// TSIG / rndc key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Key {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub other: Vec<RawOption>,
}

/// `key-store` block (PKCS#11).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyStore {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkcs11_uri: Option<String>,
    pub other: Vec<RawOption>,
}

/// Named, reusable list of servers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteServers {
    pub name: String,
    /// Default port from the block header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub servers: Vec<RemoteServerItem>,
}

/// `address [port n] [key name] [tls name]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteServerItem {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<String>,
}

impl RemoteServerItem {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }
}

/// `address [port n] [tls name]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Forwarder {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<String>,
}

impl Forwarder {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }
}

/// TLS profile for DoT/DoH.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tls {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cipher_suites: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ciphers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dhparam_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_server_ciphers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocols: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_tickets: Option<bool>,
    pub other: Vec<RawOption>,
}

/// HTTP endpoint profile for DoH.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Http {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listener_clients: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streams_per_connection: Option<u32>,
    pub other: Vec<RawOption>,
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// `controls { ... };`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Controls {
    pub channels: Vec<ControlChannel>,
    pub other: Vec<RawOption>,
}

/// One control channel, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlChannel {
    Inet(ControlInet),
    Unix(ControlUnix),
}

/// `inet address [port n] allow { ... } [keys { ... }] [read-only bool]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlInet {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub allow: Vec<MatchTerm>,
    pub keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

/// `unix "path" perm n owner n group n [keys { ... }] [read-only bool]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlUnix {
    pub path: String,
    /// Permission digits exactly as written, e.g. `0600`
    pub perm: String,
    pub owner: u32,
    pub group: u32,
    pub keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// `logging { ... };`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Logging {
    pub channels: Vec<LogChannel>,
    pub categories: Vec<LogCategory>,
    pub other: Vec<RawOption>,
}

/// `channel "name" { ... };`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogChannel {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<LogDestination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_category: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_severity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffered: Option<bool>,
    pub other: Vec<RawOption>,
}

/// Where a channel writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogDestination {
    File(LogFile),
    Syslog {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        facility: Option<String>,
    },
    Stderr,
    Null,
}

/// `file "path" [versions n|unlimited] [size s] [suffix s]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogFile {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<LogVersions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// Rotation count: a number or a keyword such as `unlimited`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogVersions {
    Count(u32),
    Keyword(String),
}

impl fmt::Display for LogVersions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Keyword(word) => f.write_str(word),
        }
    }
}

/// `category name { channel; ... };` (channel order is delivery order)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogCategory {
    pub name: String,
    pub channels: Vec<String>,
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Global `options { ... };`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recursion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_query: Option<Vec<MatchTerm>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_transfer: Option<Vec<MatchTerm>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_update: Option<Vec<MatchTerm>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listen_on: Option<Listen>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listen_on_v6: Option<Listen>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarders: Option<Vec<Forwarder>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnssec_validation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrset_order: Option<Vec<RrsetOrder>>,
    /// Every option keyword not modeled above, verbatim and in order
    pub other: Vec<RawOption>,
}

/// `listen-on [port n] [tls name] [http name] { ... }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Listen {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<String>,
    pub addrs: Vec<MatchTerm>,
}

/// One `rrset-order` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RrsetOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rrtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub order: String,
}

// ---------------------------------------------------------------------------
// Trust anchors
// ---------------------------------------------------------------------------

/// `trust-anchors { ... };`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrustAnchors {
    pub items: Vec<TrustAnchor>,
    pub other: Vec<RawOption>,
}

/// `"name" <anchor-type> <record data>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustAnchor {
    pub name: String,
    #[serde(flatten)]
    pub record: AnchorRecord,
}

/// The record text following the anchor name, by record kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorRecord {
    #[serde(rename = "ds")]
    Ds(String),
    #[serde(rename = "dnskey")]
    DnsKey(String),
}

impl AnchorRecord {
    pub fn text(&self) -> &str {
        match self {
            Self::Ds(text) | Self::DnsKey(text) => text,
        }
    }
}

// ---------------------------------------------------------------------------
// Views and zones
// ---------------------------------------------------------------------------

/// `view "name" [class] { ... };`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct View {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_clients: Option<Vec<MatchTerm>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_destinations: Option<Vec<MatchTerm>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recursion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_anchors: Option<TrustAnchors>,
    pub zones: Vec<Zone>,
    pub includes: Vec<Include>,
    pub other: Vec<RawOption>,
}

impl View {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Zone type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneType {
    Primary,
    Secondary,
    Stub,
    Mirror,
    Redirect,
    Forward,
    StaticStub,
    Hint,
}

impl ZoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Stub => "stub",
            Self::Mirror => "mirror",
            Self::Redirect => "redirect",
            Self::Forward => "forward",
            Self::StaticStub => "static-stub",
            Self::Hint => "hint",
        }
    }

    /// Parse from string, accepting both current and legacy terminology
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "primary" | "master" => Some(Self::Primary),
            "secondary" | "slave" => Some(Self::Secondary),
            "stub" => Some(Self::Stub),
            "mirror" => Some(Self::Mirror),
            "redirect" => Some(Self::Redirect),
            "forward" => Some(Self::Forward),
            "static-stub" => Some(Self::StaticStub),
            "hint" => Some(Self::Hint),
            _ => None,
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a secondary zone transfers from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Primaries {
    /// Name of a `remote-servers` list
    Ref(String),
    Inline(Vec<RemoteServerItem>),
}

/// `zone "name" [class] { ... };`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Zone {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub zone_type: Option<ZoneType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primaries: Option<Primaries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarders: Option<Vec<Forwarder>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_update: Option<Vec<MatchTerm>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_transfer: Option<Vec<MatchTerm>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub also_notify: Option<Vec<RemoteServerItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnssec_policy: Option<String>,
    pub other: Vec<RawOption>,
}

impl Zone {
    pub fn new(name: impl Into<String>, zone_type: ZoneType) -> Self {
        Self {
            name: name.into(),
            zone_type: Some(zone_type),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_term_json_shape() {
        let terms = vec![
            MatchTerm::acl("trusted").negate(),
            MatchTerm::key("rndc-key"),
            MatchTerm::nested(vec![MatchTerm::address("10.0.0.0/8")]),
        ];
        assert_eq!(
            serde_json::to_value(&terms).unwrap(),
            json!([
                {"not": true, "aclRef": "trusted"},
                {"key": "rndc-key"},
                {"nested": [{"address": "10.0.0.0/8"}]}
            ])
        );
    }

    #[test]
    fn test_match_term_json_roundtrip() {
        let value = json!({"not": true, "nested": [{"aclRef": "any"}]});
        let term: MatchTerm = serde_json::from_value(value).unwrap();
        assert_eq!(term, MatchTerm::nested(vec![MatchTerm::acl("any")]).negate());
    }

    #[test]
    fn test_singleton_presence_distinguishes_empty() {
        let absent = Config::default();
        let empty = Config {
            logging: Some(Logging::default()),
            ..Config::default()
        };
        let absent_json = serde_json::to_value(&absent).unwrap();
        let empty_json = serde_json::to_value(&empty).unwrap();
        assert!(absent_json.get("logging").is_none());
        assert_eq!(
            empty_json["logging"],
            json!({"channels": [], "categories": [], "other": []})
        );
    }

    #[test]
    fn test_zone_type_legacy_names() {
        assert_eq!(ZoneType::parse("master"), Some(ZoneType::Primary));
        assert_eq!(ZoneType::parse("slave"), Some(ZoneType::Secondary));
        assert_eq!(ZoneType::parse("static-stub"), Some(ZoneType::StaticStub));
        assert_eq!(ZoneType::parse("delegation-only"), None);
        assert_eq!(
            serde_json::to_value(ZoneType::StaticStub).unwrap(),
            json!("static-stub")
        );
    }

    #[test]
    fn test_log_destination_json_shape() {
        let file = LogDestination::File(LogFile {
            path: "named.log".into(),
            versions: Some(LogVersions::Keyword("unlimited".into())),
            ..LogFile::default()
        });
        assert_eq!(
            serde_json::to_value(&file).unwrap(),
            json!({"file": {"path": "named.log", "versions": "unlimited"}})
        );
        assert_eq!(
            serde_json::to_value(LogDestination::Stderr).unwrap(),
            json!("stderr")
        );
    }

    #[test]
    fn test_origin_ignored_by_equality() {
        let mut decoded = Config::default();
        decoded.origin = Origin(Some(File::default()));
        assert_eq!(decoded, Config::default());
    }
}
