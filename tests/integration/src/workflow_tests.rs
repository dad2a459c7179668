//! Editing workflows across the syntax tree and the typed model.

use named_config::{
    AnchorRecord, Config, DecodeOptions, MatchTerm, Options, Placement, SyncOptions, TrustAnchor,
    TrustAnchors, View, Zone, ZoneType, sync_keyword,
};
use named_cst::{File, RenderStyle, Statement};
use named_test_utils::{TestConf, fixture};
use pretty_assertions::assert_eq;

fn statement_source(file: &File, keyword: &str) -> Vec<String> {
    file.statements_with(keyword)
        .map(|stmt| stmt.source().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_edit_session_keeps_foreign_blocks() {
    let conf = TestConf::with_fixture("full.conf");
    let before = File::load(conf.path()).unwrap();

    let mut config = Config::load(conf.path()).unwrap();
    config.upsert_zone_in_view("internal", Zone::new("lab.example", ZoneType::Primary));
    assert!(config.remove_zone("."));
    config.set_trust_anchors_in_view(
        "external",
        TrustAnchors {
            items: vec![TrustAnchor {
                name: "example.".into(),
                record: AnchorRecord::Ds("static-ds 12345 8 2 \"49FD46E6\"".into()),
            }],
            other: Vec::new(),
        },
    );
    config.save(conf.path()).unwrap();

    let after = File::load(conf.path()).unwrap();
    assert_eq!(
        statement_source(&after, "statistics-channels"),
        statement_source(&before, "statistics-channels")
    );

    let reloaded = Config::load(conf.path()).unwrap();
    assert_eq!(reloaded, config);
    assert!(reloaded.get_zone(".").is_none());
    let external = reloaded.find_view("external").unwrap();
    assert_eq!(external.trust_anchors.as_ref().unwrap().items[0].name, "example.");
}

#[test]
fn test_model_from_json_applied_to_explicit_tree() {
    let original = Config::parse(&fixture("full.conf")).unwrap();
    let restored = Config::from_json(&original.to_json().unwrap()).unwrap();
    assert!(restored.to_file().is_err());

    let mut tree = File::parse(&fixture("full.conf")).unwrap();
    restored.apply(&mut tree);
    assert_eq!(tree.render(), original.to_file().unwrap().render());
}

#[test]
fn test_hand_built_model_encodes_stably() {
    let mut config = Config::default();
    config.options = Some(Options {
        directory: Some("/var/named".into()),
        recursion: Some(false),
        allow_query: Some(vec![
            MatchTerm::acl("localnets"),
            MatchTerm::nested(vec![MatchTerm::address("10.0.0.0/8"), MatchTerm::acl("bogons").negate()]),
        ]),
        ..Options::default()
    });
    let mut view = View::new("lan");
    view.match_clients = Some(vec![MatchTerm::key("lan-key")]);
    view.zones.push(Zone::new("lan.example", ZoneType::Primary));
    config.views.push(view);

    let mut tree = File::default();
    config.apply(&mut tree);
    let first = tree.render();

    let decoded = Config::parse(&first).unwrap();
    assert_eq!(decoded, config);
    let second = decoded.to_file().unwrap().render();
    assert_eq!(second, first);
}

#[test]
fn test_strict_decode_reports_unknown_zone_statement() {
    let file = File::parse(&fixture("full.conf")).unwrap();
    let options = DecodeOptions {
        preserve_unknown: false,
    };
    let (config, report) = Config::decode_with(&file, &options);

    assert!(report.dropped.iter().any(|fragment| fragment.scope == "zone"
        && fragment.keyword == "notify"
        && fragment.text == "notify explicit"));
    assert!(config.get_zone("example.com").unwrap().other.is_empty());
    // options keeps its overflow regardless
    assert_eq!(config.options.unwrap().other.len(), 2);
}

#[test]
fn test_in_place_save_with_custom_indent() {
    let conf = TestConf::with_text("# head\nzone \"a.example\" { type master; };\n# tail\n");
    let mut config = Config::load(conf.path()).unwrap();
    config.get_zone_mut("a.example").unwrap().file = Some("a.db".into());
    config
        .save_with(conf.path(), &SyncOptions::in_place(), &RenderStyle::with_indent("    "))
        .unwrap();

    assert_eq!(
        conf.read(),
        "# head\nzone \"a.example\" {\n    type primary;\n    file \"a.db\";\n};\n# tail\n"
    );
}

#[test]
fn test_sync_keyword_on_custom_statement() {
    let mut file = File::parse(&fixture("unmodeled.conf")).unwrap();
    sync_keyword(
        &mut file.nodes,
        "server",
        vec![Statement::block("server 192.0.2.44", vec![Statement::simple("bogus no").into()])],
        Placement::InPlace,
    );

    let config = Config::decode(&file);
    let text = config.to_file().unwrap().render();
    assert!(text.contains("server 192.0.2.44 {\n\tbogus no;\n};\n"));
    assert!(text.contains("dyndb \"sample\" \"sample.so\" { example.com; };"));
}
