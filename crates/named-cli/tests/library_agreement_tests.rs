//! The `namedctl` binary and the library agree on what a file means.

use assert_cmd::Command;
use named_config::{Config, ZoneType};
use named_test_utils::TestConf;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

fn namedctl(conf: &TestConf) -> Command {
    let settings = conf.root().join("namedctl.toml");
    std::fs::write(&settings, "").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("namedctl"));
    cmd.env("NO_COLOR", "1").env("NAMEDCTL_CONFIG", settings);
    cmd
}

#[test]
fn test_fmt_preserves_model() {
    for name in named_test_utils::fixtures::ALL {
        let conf = TestConf::with_fixture(name);
        let before = Config::load(conf.path()).unwrap();

        namedctl(&conf).arg("fmt").arg(conf.path()).assert().success();

        assert_eq!(Config::load(conf.path()).unwrap(), before, "{name}");
        namedctl(&conf)
            .arg("check")
            .arg(conf.path())
            .assert()
            .success();
    }
}

#[test]
fn test_show_json_matches_library() {
    let conf = TestConf::with_fixture("full.conf");
    let output = namedctl(&conf)
        .args(["show", "--json"])
        .arg(conf.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let shown = Config::from_json(&String::from_utf8(output.stdout).unwrap()).unwrap();
    assert_eq!(shown, Config::load(conf.path()).unwrap());
}

#[test]
fn test_zone_add_visible_to_library() {
    let conf = TestConf::with_fixture("minimal.conf");
    namedctl(&conf)
        .args(["zone", "add"])
        .arg(conf.path())
        .args(["stub.example", "--type", "stub"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added zone"));

    let config = Config::load(conf.path()).unwrap();
    assert_eq!(
        config.get_zone("stub.example").unwrap().zone_type,
        Some(ZoneType::Stub)
    );
    assert_eq!(config.get_zone("example.com").unwrap().file.as_deref(), Some("example.com.db"));
}
