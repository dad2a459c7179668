//! Canonical statements built from the typed model
//!
//! Modeled children come first in a fixed order, followed by the block's
//! `other` statements in their recorded order.

use named_cst::{Node, Statement};

use crate::codec::{
    control, listen, match_list, quote, quote_if_needed, rrset_order, scalar, servers, trust_anchor,
};
use crate::model::*;

/// Collects child statements of a block.
#[derive(Default)]
struct Body(Vec<Node>);

impl Body {
    fn line(&mut self, line: impl AsRef<str>) {
        self.0.push(Statement::simple(line).into());
    }

    fn opt<T>(&mut self, keyword: &str, value: Option<T>, encode: impl FnOnce(T) -> String) {
        if let Some(value) = value {
            self.line(format!("{keyword} {}", encode(value)));
        }
    }

    fn quoted(&mut self, keyword: &str, value: Option<&String>) {
        self.opt(keyword, value, |v| quote(v));
    }

    fn bool(&mut self, keyword: &str, value: Option<bool>) {
        self.opt(keyword, value, |v| scalar::encode_bool(v).to_string());
    }

    fn block(&mut self, stmt: Statement) {
        self.0.push(stmt.into());
    }

    fn other(mut self, other: &[RawOption]) -> Vec<Node> {
        for option in other {
            self.line(option.line());
        }
        self.0
    }
}

fn named_header(keyword: &str, name: &str, class: Option<&String>) -> String {
    match class {
        Some(class) => format!("{keyword} {} {class}", quote(name)),
        None => format!("{keyword} {}", quote(name)),
    }
}

pub fn include(include: &Include) -> Statement {
    Statement::simple(format!("include {}", quote(&include.path)))
}

pub fn acl(acl: &Acl) -> Statement {
    let body = acl
        .elements
        .iter()
        .map(|term| Statement::simple(match_list::encode_term(term)).into())
        .collect();
    Statement::block(named_header("acl", &acl.name, None), body)
}

pub fn key(key: &Key) -> Statement {
    let mut body = Body::default();
    body.quoted("algorithm", key.algorithm.as_ref());
    body.quoted("secret", key.secret.as_ref());
    Statement::block(named_header("key", &key.name, None), body.other(&key.other))
}

pub fn key_store(store: &KeyStore) -> Statement {
    let mut body = Body::default();
    body.quoted("pkcs11-uri", store.pkcs11_uri.as_ref());
    Statement::block(
        named_header("key-store", &store.name, None),
        body.other(&store.other),
    )
}

pub fn remote_servers(list: &RemoteServers) -> Statement {
    let mut header = named_header("remote-servers", &list.name, None);
    if let Some(port) = list.port {
        header.push_str(&format!(" port {port}"));
    }
    let body = list
        .servers
        .iter()
        .map(|item| Statement::simple(servers::encode_remote_item(item)).into())
        .collect();
    Statement::block(header, body)
}

pub fn tls(tls: &Tls) -> Statement {
    let mut body = Body::default();
    body.quoted("ca-file", tls.ca_file.as_ref());
    body.quoted("cert-file", tls.cert_file.as_ref());
    body.quoted("key-file", tls.key_file.as_ref());
    body.quoted("cipher-suites", tls.cipher_suites.as_ref());
    body.quoted("ciphers", tls.ciphers.as_ref());
    body.quoted("dhparam-file", tls.dhparam_file.as_ref());
    body.bool("prefer-server-ciphers", tls.prefer_server_ciphers);
    body.opt("protocols", tls.protocols.as_deref(), scalar::encode_string_list);
    body.quoted("remote-hostname", tls.remote_hostname.as_ref());
    body.bool("session-tickets", tls.session_tickets);
    Statement::block(named_header("tls", &tls.name, None), body.other(&tls.other))
}

pub fn http(http: &Http) -> Statement {
    let mut body = Body::default();
    body.opt("endpoints", http.endpoints.as_deref(), scalar::encode_string_list);
    body.opt("listener-clients", http.listener_clients, |n| n.to_string());
    body.opt("streams-per-connection", http.streams_per_connection, |n| n.to_string());
    Statement::block(named_header("http", &http.name, None), body.other(&http.other))
}

pub fn controls(controls: &Controls) -> Statement {
    let mut body = Body::default();
    for channel in &controls.channels {
        match channel {
            ControlChannel::Inet(inet) => body.line(control::encode_inet(inet)),
            ControlChannel::Unix(unix) => body.line(control::encode_unix(unix)),
        }
    }
    Statement::block("controls", body.other(&controls.other))
}

pub fn logging(logging: &Logging) -> Statement {
    let mut body = Body::default();
    for channel in &logging.channels {
        body.block(log_channel(channel));
    }
    for category in &logging.categories {
        body.block(log_category(category));
    }
    Statement::block("logging", body.other(&logging.other))
}

fn log_channel(channel: &LogChannel) -> Statement {
    let mut body = Body::default();
    match &channel.destination {
        Some(LogDestination::File(file)) => body.line(log_file(file)),
        Some(LogDestination::Syslog { facility: Some(facility) }) => {
            body.line(format!("syslog {facility}"));
        }
        Some(LogDestination::Syslog { facility: None }) => body.line("syslog"),
        Some(LogDestination::Stderr) => body.line("stderr"),
        Some(LogDestination::Null) => body.line("null"),
        None => {}
    }
    body.opt("severity", channel.severity.as_ref(), String::clone);
    body.bool("print-time", channel.print_time);
    body.bool("print-category", channel.print_category);
    body.bool("print-severity", channel.print_severity);
    body.bool("buffered", channel.buffered);
    Statement::block(
        named_header("channel", &channel.name, None),
        body.other(&channel.other),
    )
}

fn log_file(file: &LogFile) -> String {
    let mut line = format!("file {}", quote(&file.path));
    if let Some(versions) = &file.versions {
        line.push_str(&format!(" versions {versions}"));
    }
    if let Some(size) = &file.size {
        line.push_str(&format!(" size {size}"));
    }
    if let Some(suffix) = &file.suffix {
        line.push_str(&format!(" suffix {suffix}"));
    }
    line
}

fn log_category(category: &LogCategory) -> Statement {
    let body = category
        .channels
        .iter()
        .map(|name| Statement::simple(quote_if_needed(name)).into())
        .collect();
    Statement::block(format!("category {}", quote_if_needed(&category.name)), body)
}

pub fn options(options: &Options) -> Statement {
    let mut body = Body::default();
    body.quoted("directory", options.directory.as_ref());
    body.bool("recursion", options.recursion);
    body.opt("allow-query", options.allow_query.as_deref(), match_list::encode);
    body.opt("allow-transfer", options.allow_transfer.as_deref(), match_list::encode);
    body.opt("allow-update", options.allow_update.as_deref(), match_list::encode);
    body.opt("listen-on", options.listen_on.as_ref(), listen::encode);
    body.opt("listen-on-v6", options.listen_on_v6.as_ref(), listen::encode);
    body.opt("forwarders", options.forwarders.as_deref(), servers::encode_forwarders);
    body.opt("forward", options.forward.as_ref(), String::clone);
    body.opt("dnssec-validation", options.dnssec_validation.as_ref(), String::clone);
    body.opt("rrset-order", options.rrset_order.as_deref(), rrset_order::encode);
    Statement::block("options", body.other(&options.other))
}

pub fn trust_anchors(anchors: &TrustAnchors) -> Statement {
    let mut body = Body::default();
    for anchor in &anchors.items {
        body.line(trust_anchor::encode_entry(anchor));
    }
    Statement::block("trust-anchors", body.other(&anchors.other))
}

pub fn view(view: &View) -> Statement {
    let mut body = Body::default();
    body.opt("match-clients", view.match_clients.as_deref(), match_list::encode);
    body.opt("match-destinations", view.match_destinations.as_deref(), match_list::encode);
    body.bool("recursion", view.recursion);
    if let Some(anchors) = &view.trust_anchors {
        body.block(trust_anchors(anchors));
    }
    for z in &view.zones {
        body.block(zone(z));
    }
    for inc in &view.includes {
        body.block(include(inc));
    }
    Statement::block(
        named_header("view", &view.name, view.class.as_ref()),
        body.other(&view.other),
    )
}

pub fn zone(zone: &Zone) -> Statement {
    let mut body = Body::default();
    body.opt("type", zone.zone_type, |t| t.to_string());
    body.quoted("file", zone.file.as_ref());
    body.opt("primaries", zone.primaries.as_ref(), |primaries| match primaries {
        Primaries::Ref(name) => quote_if_needed(name),
        Primaries::Inline(items) => servers::encode_remote_list(items),
    });
    body.opt("forwarders", zone.forwarders.as_deref(), servers::encode_forwarders);
    body.opt("forward", zone.forward.as_ref(), String::clone);
    body.opt("allow-update", zone.allow_update.as_deref(), match_list::encode);
    body.opt("allow-transfer", zone.allow_transfer.as_deref(), match_list::encode);
    body.opt("also-notify", zone.also_notify.as_deref(), servers::encode_remote_list);
    body.quoted("dnssec-policy", zone.dnssec_policy.as_ref());
    Statement::block(
        named_header("zone", &zone.name, zone.class.as_ref()),
        body.other(&zone.other),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use named_cst::{File, RenderStyle};
    use pretty_assertions::assert_eq;

    fn render(stmt: Statement) -> String {
        File::new(vec![stmt.into()]).render_with(&RenderStyle::with_indent("  "))
    }

    #[test]
    fn test_zone_layout() {
        let mut z = Zone::new("example.com", ZoneType::Secondary);
        z.class = Some("IN".into());
        z.primaries = Some(Primaries::Ref("upstream".into()));
        z.allow_transfer = Some(vec![MatchTerm::acl("none")]);
        z.other.push(RawOption::new("notify", "explicit"));

        assert_eq!(
            render(zone(&z)),
            "zone \"example.com\" IN {\n  type secondary;\n  primaries upstream;\n  allow-transfer { none; };\n  notify explicit;\n};\n"
        );
    }

    #[test]
    fn test_acl_one_term_per_line() {
        let a = Acl {
            name: "trusted".into(),
            elements: vec![
                MatchTerm::address("10.0.0.0/8"),
                MatchTerm::acl("bogons").negate(),
                MatchTerm::key("rndc-key"),
            ],
        };
        assert_eq!(
            render(acl(&a)),
            "acl \"trusted\" {\n  10.0.0.0/8;\n  !bogons;\n  key \"rndc-key\";\n};\n"
        );
    }

    #[test]
    fn test_logging_layout() {
        let l = Logging {
            channels: vec![LogChannel {
                name: "main".into(),
                destination: Some(LogDestination::File(LogFile {
                    path: "named.log".into(),
                    versions: Some(LogVersions::Keyword("unlimited".into())),
                    ..LogFile::default()
                })),
                print_time: Some(true),
                ..LogChannel::default()
            }],
            categories: vec![LogCategory {
                name: "default".into(),
                channels: vec!["main".into()],
            }],
            other: Vec::new(),
        };
        assert_eq!(
            render(logging(&l)),
            "logging {\n  channel \"main\" {\n    file \"named.log\" versions unlimited;\n    print-time yes;\n  };\n  category default {\n    main;\n  };\n};\n"
        );
    }

    #[test]
    fn test_key_without_algorithm() {
        let k = Key {
            name: "k".into(),
            secret: Some("abc".into()),
            ..Key::default()
        };
        assert_eq!(render(key(&k)), "key \"k\" {\n  secret \"abc\";\n};\n");
    }

    #[test]
    fn test_empty_singleton_block() {
        assert_eq!(render(options(&Options::default())), "options {\n};\n");
    }

    #[test]
    fn test_controls_layout() {
        let c = Controls {
            channels: vec![ControlChannel::Inet(ControlInet {
                address: "127.0.0.1".into(),
                allow: vec![MatchTerm::acl("localhost")],
                ..ControlInet::default()
            })],
            other: Vec::new(),
        };
        assert_eq!(
            render(controls(&c)),
            "controls {\n  inet 127.0.0.1 allow { localhost; };\n};\n"
        );
    }
}
