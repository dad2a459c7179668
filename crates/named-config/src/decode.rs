//! Projection of a syntax tree onto the typed model
//!
//! One pass over the top-level statements, dispatching on keyword. Blocks
//! recurse the same way. Top-level statements with keywords the model does
//! not cover stay only in the syntax tree.

use std::path::Path;

use named_cst::{File, Statement, find_group};

use crate::codec::{control, listen, match_list, rrset_order, scalar, servers, trim_quotes, trust_anchor};
use crate::error::Result;
use crate::header::{after_name, block_class, block_name};
use crate::model::*;
use crate::options::DecodeOptions;

/// Statements the projection could not place in the model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub dropped: Vec<DroppedFragment>,
}

impl DecodeReport {
    pub fn is_empty(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// One dropped statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFragment {
    /// Keyword of the enclosing block
    pub scope: String,
    pub keyword: String,
    /// The statement text without terminator
    pub text: String,
}

impl Config {
    /// Project a syntax tree with default options.
    pub fn decode(file: &File) -> Self {
        Self::decode_with(file, &DecodeOptions::default()).0
    }

    /// Project a syntax tree, returning what could not be placed in the model.
    ///
    /// The tree is kept in the returned configuration so that it can be
    /// saved later.
    pub fn decode_with(file: &File, options: &DecodeOptions) -> (Self, DecodeReport) {
        let mut projector = Projector {
            options,
            report: DecodeReport::default(),
        };
        let mut config = projector.config(file);
        config.origin = Origin(Some(file.clone()));
        tracing::debug!(dropped = projector.report.dropped.len(), "Decoded configuration");
        (config, projector.report)
    }

    /// Parse configuration text and project it.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::decode(&File::parse(text)?))
    }

    /// Read, parse and project a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::decode(&File::load(path)?))
    }
}

struct Projector<'a> {
    options: &'a DecodeOptions,
    report: DecodeReport,
}

impl Projector<'_> {
    fn config(&mut self, file: &File) -> Config {
        let mut config = Config::default();

        for stmt in file.statements() {
            match stmt.keyword() {
                "include" => config.includes.push(include(stmt)),
                "acl" => config.acls.push(acl(stmt)),
                "key" => config.keys.push(self.key(stmt)),
                "key-store" => config.key_stores.push(self.key_store(stmt)),
                "remote-servers" => config.remote_servers.push(remote_servers(stmt)),
                "tls" => config.tls.push(self.tls(stmt)),
                "http" => config.http.push(self.http(stmt)),
                "controls" if config.controls.is_none() => {
                    config.controls = Some(self.controls(stmt));
                }
                "logging" if config.logging.is_none() => {
                    config.logging = Some(self.logging(stmt));
                }
                "options" if config.options.is_none() => {
                    config.options = Some(self.options(stmt));
                }
                "controls" | "logging" | "options" => self.drop("config", stmt),
                "trust-anchors" => config.trust_anchors.push(self.trust_anchors(stmt)),
                "view" => config.views.push(self.view(stmt)),
                "zone" => config.zones.push(self.zone(stmt)),
                other => tracing::trace!(keyword = other, "Left to the syntax tree"),
            }
        }

        config
    }

    /// Keep an unrecognized child in `other`, or report it.
    fn unknown(&mut self, scope: &str, stmt: &Statement, other: &mut Vec<RawOption>) {
        if self.options.preserve_unknown {
            other.push(RawOption::from_statement(stmt));
        } else {
            self.drop(scope, stmt);
        }
    }

    fn drop(&mut self, scope: &str, stmt: &Statement) {
        tracing::debug!(scope, keyword = stmt.keyword(), "Dropped unrecognized statement");
        self.report.dropped.push(DroppedFragment {
            scope: scope.to_string(),
            keyword: stmt.keyword().to_string(),
            text: stmt.text(),
        });
    }

    fn key(&mut self, stmt: &Statement) -> Key {
        let mut key = Key {
            name: block_name(stmt.header()),
            ..Key::default()
        };
        for child in stmt.children() {
            let value = child.value();
            let handled = match child.keyword() {
                "algorithm" => set(&mut key.algorithm, Some(scalar::decode_quoted(&value))),
                "secret" => set(&mut key.secret, Some(scalar::decode_quoted(&value))),
                _ => false,
            };
            if !handled {
                self.unknown("key", child, &mut key.other);
            }
        }
        key
    }

    fn key_store(&mut self, stmt: &Statement) -> KeyStore {
        let mut store = KeyStore {
            name: block_name(stmt.header()),
            ..KeyStore::default()
        };
        for child in stmt.children() {
            let handled = match child.keyword() {
                "pkcs11-uri" => set(&mut store.pkcs11_uri, Some(scalar::decode_quoted(&child.value()))),
                _ => false,
            };
            if !handled {
                self.unknown("key-store", child, &mut store.other);
            }
        }
        store
    }

    fn tls(&mut self, stmt: &Statement) -> Tls {
        let mut tls = Tls {
            name: block_name(stmt.header()),
            ..Tls::default()
        };
        for child in stmt.children() {
            let value = child.value();
            let handled = match child.keyword() {
                "ca-file" => set(&mut tls.ca_file, Some(scalar::decode_quoted(&value))),
                "cert-file" => set(&mut tls.cert_file, Some(scalar::decode_quoted(&value))),
                "key-file" => set(&mut tls.key_file, Some(scalar::decode_quoted(&value))),
                "cipher-suites" => set(&mut tls.cipher_suites, Some(scalar::decode_quoted(&value))),
                "ciphers" => set(&mut tls.ciphers, Some(scalar::decode_quoted(&value))),
                "dhparam-file" => set(&mut tls.dhparam_file, Some(scalar::decode_quoted(&value))),
                "prefer-server-ciphers" => set(&mut tls.prefer_server_ciphers, scalar::decode_bool(&value)),
                "protocols" => set(&mut tls.protocols, Some(scalar::decode_string_list(&value))),
                "remote-hostname" => set(&mut tls.remote_hostname, Some(scalar::decode_quoted(&value))),
                "session-tickets" => set(&mut tls.session_tickets, scalar::decode_bool(&value)),
                _ => false,
            };
            if !handled {
                self.unknown("tls", child, &mut tls.other);
            }
        }
        tls
    }

    fn http(&mut self, stmt: &Statement) -> Http {
        let mut http = Http {
            name: block_name(stmt.header()),
            ..Http::default()
        };
        for child in stmt.children() {
            let value = child.value();
            let handled = match child.keyword() {
                "endpoints" => set(&mut http.endpoints, Some(scalar::decode_string_list(&value))),
                "listener-clients" => set(&mut http.listener_clients, scalar::decode_int(&value)),
                "streams-per-connection" => {
                    set(&mut http.streams_per_connection, scalar::decode_int(&value))
                }
                _ => false,
            };
            if !handled {
                self.unknown("http", child, &mut http.other);
            }
        }
        http
    }

    fn controls(&mut self, stmt: &Statement) -> Controls {
        let mut controls = Controls::default();
        for child in stmt.children() {
            match child.keyword() {
                "inet" => controls
                    .channels
                    .push(ControlChannel::Inet(control::decode_inet(&child.value()))),
                "unix" => controls
                    .channels
                    .push(ControlChannel::Unix(control::decode_unix(&child.value()))),
                _ => self.unknown("controls", child, &mut controls.other),
            }
        }
        controls
    }

    fn logging(&mut self, stmt: &Statement) -> Logging {
        let mut logging = Logging::default();
        for child in stmt.children() {
            match child.keyword() {
                "channel" => logging.channels.push(self.log_channel(child)),
                "category" => logging.categories.push(log_category(child)),
                _ => self.unknown("logging", child, &mut logging.other),
            }
        }
        logging
    }

    fn log_channel(&mut self, stmt: &Statement) -> LogChannel {
        let mut channel = LogChannel {
            name: block_name(stmt.header()),
            ..LogChannel::default()
        };

        for child in stmt.children() {
            let value = child.value();
            let destination = match child.keyword() {
                "file" => Some(LogDestination::File(log_file(&value))),
                "syslog" => Some(LogDestination::Syslog {
                    facility: value.split_whitespace().next().map(str::to_string),
                }),
                "stderr" => Some(LogDestination::Stderr),
                "null" => Some(LogDestination::Null),
                _ => None,
            };
            if let Some(destination) = destination {
                if channel.destination.is_none() {
                    channel.destination = Some(destination);
                } else {
                    self.unknown("channel", child, &mut channel.other);
                }
                continue;
            }

            let handled = match child.keyword() {
                "severity" => set(&mut channel.severity, Some(value)),
                "print-time" => set(&mut channel.print_time, scalar::decode_bool(&value)),
                "print-category" => set(&mut channel.print_category, scalar::decode_bool(&value)),
                "print-severity" => set(&mut channel.print_severity, scalar::decode_bool(&value)),
                "buffered" => set(&mut channel.buffered, scalar::decode_bool(&value)),
                _ => false,
            };
            if !handled {
                self.unknown("channel", child, &mut channel.other);
            }
        }
        channel
    }

    fn options(&mut self, stmt: &Statement) -> Options {
        let mut options = Options::default();

        for child in stmt.children() {
            let value = child.value();
            let keyword = child.keyword();
            let handled = match keyword {
                "directory" => set(&mut options.directory, Some(scalar::decode_quoted(&value))),
                "recursion" => set(&mut options.recursion, scalar::decode_bool(&value)),
                "allow-query" => set(&mut options.allow_query, match_group(&value)),
                "allow-transfer" => set(&mut options.allow_transfer, match_group(&value)),
                "allow-update" => set(&mut options.allow_update, match_group(&value)),
                "listen-on" => set(&mut options.listen_on, Some(listen::decode(&value))),
                "listen-on-v6" => set(&mut options.listen_on_v6, Some(listen::decode(&value))),
                "forwarders" => set(&mut options.forwarders, forwarder_list(&value)),
                "forward" => set(&mut options.forward, scalar::decode_word(keyword, &value)),
                "dnssec-validation" => {
                    set(&mut options.dnssec_validation, scalar::decode_word(keyword, &value))
                }
                "rrset-order" => set(&mut options.rrset_order, Some(rrset_order::decode(&value))),
                _ => false,
            };
            if !handled {
                options.other.push(RawOption::from_statement(child));
            }
        }
        options
    }

    fn trust_anchors(&mut self, stmt: &Statement) -> TrustAnchors {
        let mut anchors = TrustAnchors::default();
        for child in stmt.children() {
            match trust_anchor::decode_entry(&child.text()) {
                Some(anchor) => anchors.items.push(anchor),
                None => self.unknown("trust-anchors", child, &mut anchors.other),
            }
        }
        anchors
    }

    fn view(&mut self, stmt: &Statement) -> View {
        let mut view = View {
            name: block_name(stmt.header()),
            class: block_class(stmt.header()),
            ..View::default()
        };

        for child in stmt.children() {
            let value = child.value();
            let handled = match child.keyword() {
                "match-clients" => set(&mut view.match_clients, match_group(&value)),
                "match-destinations" => set(&mut view.match_destinations, match_group(&value)),
                "recursion" => set(&mut view.recursion, scalar::decode_bool(&value)),
                "trust-anchors" if view.trust_anchors.is_none() => {
                    let anchors = self.trust_anchors(child);
                    set(&mut view.trust_anchors, Some(anchors))
                }
                "zone" => {
                    let zone = self.zone(child);
                    view.zones.push(zone);
                    true
                }
                "include" => {
                    view.includes.push(include(child));
                    true
                }
                _ => false,
            };
            if !handled {
                self.unknown("view", child, &mut view.other);
            }
        }
        view
    }

    fn zone(&mut self, stmt: &Statement) -> Zone {
        let mut zone = Zone {
            name: block_name(stmt.header()),
            class: block_class(stmt.header()),
            ..Zone::default()
        };

        for child in stmt.children() {
            let value = child.value();
            let keyword = child.keyword();
            let handled = match keyword {
                "type" => set(
                    &mut zone.zone_type,
                    value.split_whitespace().next().and_then(ZoneType::parse),
                ),
                "file" => set(&mut zone.file, Some(scalar::decode_quoted(&value))),
                "primaries" | "masters" => set(&mut zone.primaries, primaries(&value)),
                "forwarders" => set(&mut zone.forwarders, forwarder_list(&value)),
                "forward" => set(&mut zone.forward, scalar::decode_word(keyword, &value)),
                "allow-update" => set(&mut zone.allow_update, match_group(&value)),
                "allow-transfer" => set(&mut zone.allow_transfer, match_group(&value)),
                "also-notify" => set(&mut zone.also_notify, server_list(&value)),
                "dnssec-policy" => set(&mut zone.dnssec_policy, Some(scalar::decode_quoted(&value))),
                _ => false,
            };
            if !handled {
                self.unknown("zone", child, &mut zone.other);
            }
        }
        zone
    }
}

/// Store a decoded value in an empty slot.
///
/// False when there was nothing to store or the slot already holds a value
/// from an earlier statement; the caller keeps that statement verbatim.
fn set<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(value) if slot.is_none() => {
            *slot = Some(value);
            true
        }
        _ => false,
    }
}

/// The first brace group of a value as a match list.
fn match_group(value: &str) -> Option<Vec<MatchTerm>> {
    find_group(value).map(|(start, end)| match_list::decode(&value[start..end]))
}

/// A bare `{ ... }` server list; a list with header arguments is not modeled.
fn server_list(value: &str) -> Option<Vec<RemoteServerItem>> {
    value
        .starts_with('{')
        .then(|| servers::decode_remote_list(value))
}

/// A bare `{ ... }` forwarder list; `port`/`tls` header arguments are not modeled.
fn forwarder_list(value: &str) -> Option<Vec<Forwarder>> {
    value
        .starts_with('{')
        .then(|| servers::decode_forwarders(value))
}

fn primaries(value: &str) -> Option<Primaries> {
    if value.starts_with('{') {
        return server_list(value).map(Primaries::Inline);
    }
    if value.is_empty() || find_group(value).is_some() {
        return None;
    }
    Some(Primaries::Ref(trim_quotes(value).to_string()))
}

fn include(stmt: &Statement) -> Include {
    Include::new(scalar::decode_quoted(&stmt.value()))
}

fn acl(stmt: &Statement) -> Acl {
    Acl {
        name: block_name(stmt.header()),
        elements: stmt
            .block_text()
            .map(|text| match_list::decode(&text))
            .unwrap_or_default(),
    }
}

fn remote_servers(stmt: &Statement) -> RemoteServers {
    let mut list = RemoteServers {
        name: block_name(stmt.header()),
        ..RemoteServers::default()
    };
    let words = after_name(stmt.header());
    if let Some(index) = words.iter().position(|w| *w == "port") {
        list.port = words.get(index + 1).and_then(|v| scalar::decode_int(v));
    }
    list.servers = stmt
        .children()
        .filter_map(|child| servers::decode_remote_item(&child.text()))
        .collect();
    list
}

fn log_category(stmt: &Statement) -> LogCategory {
    LogCategory {
        name: block_name(stmt.header()),
        channels: stmt
            .block_text()
            .map(|text| scalar::decode_string_list(&text))
            .unwrap_or_default(),
    }
}

/// `"path" [versions n|unlimited] [size s] [suffix s]`
fn log_file(value: &str) -> LogFile {
    let words = crate::codec::tokens(value);
    let Some((path, rest)) = words.split_first() else {
        return LogFile::default();
    };
    let mut file = LogFile {
        path: trim_quotes(path).to_string(),
        ..LogFile::default()
    };

    let mut iter = rest.iter();
    while let Some(&word) = iter.next() {
        match word {
            "versions" => {
                file.versions = iter.next().map(|v| match v.parse() {
                    Ok(count) => LogVersions::Count(count),
                    Err(_) => LogVersions::Keyword(v.to_string()),
                });
            }
            "size" => file.size = iter.next().map(|v| v.to_string()),
            "suffix" => file.suffix = iter.next().map(|v| v.to_string()),
            other => tracing::debug!(token = other, "Dropped unknown log file token"),
        }
    }
    file
}
