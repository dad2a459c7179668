//! Synchronization of the typed model back onto a syntax tree
//!
//! For every modeled keyword, all old statements are removed and one freshly
//! built statement per model entity is inserted, in model order. Statements
//! with any other keyword, and all raw text, keep their relative order and
//! their exact text.

use std::path::Path;

use named_cst::{File, Node, Raw, RenderStyle, Statement};

use crate::build;
use crate::error::{Error, Result};
use crate::model::{Config, Origin};
use crate::options::{Placement, SyncOptions};

/// Top-level keywords owned by the typed model, in sync order.
pub const MODELED_KEYWORDS: [&str; 13] = [
    "include",
    "acl",
    "key",
    "key-store",
    "remote-servers",
    "tls",
    "http",
    "controls",
    "logging",
    "options",
    "trust-anchors",
    "view",
    "zone",
];

/// Replace every statement with `keyword` by `built`.
///
/// A whitespace-only raw node directly after a removed parsed statement goes
/// with it, as does the line ending that starts any other raw node there.
/// Built statements carry no trailing text, so nothing after them is touched
/// and repeated passes produce the same text.
pub fn sync_keyword(nodes: &mut Vec<Node>, keyword: &str, built: Vec<Statement>, placement: Placement) {
    let old = std::mem::take(nodes);
    let mut slot = None;
    let mut removed = 0usize;
    let mut after_removed = false;

    for node in old {
        let node = if std::mem::take(&mut after_removed) {
            match without_line_end(node) {
                Some(node) => node,
                None => continue,
            }
        } else {
            node
        };
        if node.keyword() == Some(keyword) {
            slot.get_or_insert(nodes.len());
            removed += 1;
            after_removed = node.as_statement().is_some_and(|stmt| stmt.source().is_some());
            continue;
        }
        nodes.push(node);
    }

    let added = built.len();
    let built = built.into_iter().map(Node::Statement);
    match (placement, slot) {
        (Placement::InPlace, Some(index)) => {
            nodes.splice(index..index, built);
        }
        _ => nodes.extend(built),
    }

    tracing::debug!(keyword, removed, added, "Synchronized statements");
}

fn without_line_end(node: Node) -> Option<Node> {
    match node {
        Node::Raw(raw) if raw.is_blank() => None,
        Node::Raw(raw) => {
            let text = raw
                .text
                .strip_prefix("\r\n")
                .or_else(|| raw.text.strip_prefix('\n'))
                .unwrap_or(&raw.text);
            Some(Node::Raw(Raw::new(text)))
        }
        stmt => Some(stmt),
    }
}

impl Config {
    /// The syntax tree this configuration was decoded from, if any.
    pub fn source(&self) -> Option<&File> {
        self.origin.0.as_ref()
    }

    /// Rebuild every modeled block of `file` from this configuration.
    pub fn apply(&self, file: &mut File) {
        self.apply_with(file, &SyncOptions::default());
    }

    pub fn apply_with(&self, file: &mut File, options: &SyncOptions) {
        let nodes = &mut file.nodes;
        let placement = options.placement;
        let mut sync = |keyword: &str, built: Vec<Statement>| {
            sync_keyword(nodes, keyword, built, placement);
        };

        sync("include", self.includes.iter().map(build::include).collect());
        sync("acl", self.acls.iter().map(build::acl).collect());
        sync("key", self.keys.iter().map(build::key).collect());
        sync("key-store", self.key_stores.iter().map(build::key_store).collect());
        sync("remote-servers", self.remote_servers.iter().map(build::remote_servers).collect());
        sync("tls", self.tls.iter().map(build::tls).collect());
        sync("http", self.http.iter().map(build::http).collect());
        sync("controls", self.controls.iter().map(build::controls).collect());
        sync("logging", self.logging.iter().map(build::logging).collect());
        sync("options", self.options.iter().map(build::options).collect());
        sync("trust-anchors", self.trust_anchors.iter().map(build::trust_anchors).collect());
        sync("view", self.views.iter().map(build::view).collect());
        sync("zone", self.zones.iter().map(build::zone).collect());
    }

    /// A copy of the source tree with this configuration applied.
    ///
    /// # Errors
    ///
    /// [`Error::MissingSource`] when the configuration was not decoded from a tree.
    pub fn to_file(&self) -> Result<File> {
        self.to_file_with(&SyncOptions::default())
    }

    pub fn to_file_with(&self, options: &SyncOptions) -> Result<File> {
        let mut file = self.source().cloned().ok_or(Error::MissingSource)?;
        self.apply_with(&mut file, options);
        Ok(file)
    }

    /// Apply onto the source tree and write it atomically to `path`.
    ///
    /// On success the written tree becomes the new source.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with(path, &SyncOptions::default(), &RenderStyle::default())
    }

    pub fn save_with(
        &mut self,
        path: impl AsRef<Path>,
        options: &SyncOptions,
        style: &RenderStyle,
    ) -> Result<()> {
        let file = self.to_file_with(options)?;
        file.save_with(path, style)?;
        self.origin = Origin(Some(file));
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a configuration; it has no source tree.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{View, Zone, ZoneType};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sync_keyword_append_moves_to_end() {
        let mut file = File::parse("zone \"a\" { };\n// keep\nacl x { any; };\n").unwrap();
        sync_keyword(
            &mut file.nodes,
            "zone",
            vec![Statement::simple("zone \"b\"")],
            Placement::Append,
        );
        assert_eq!(file.render(), "// keep\nacl x { any; };\nzone \"b\";\n");
    }

    #[test]
    fn test_sync_keyword_in_place() {
        let mut file = File::parse("a 1;\nzone \"a\" { };\nb 2;\nzone \"c\" { };\n").unwrap();
        sync_keyword(
            &mut file.nodes,
            "zone",
            vec![Statement::simple("zone \"b\"")],
            Placement::InPlace,
        );
        assert_eq!(file.render(), "a 1;\nzone \"b\";\nb 2;\n");
    }

    #[test]
    fn test_sync_keyword_empty_removes_all() {
        let mut file = File::parse("view \"a\" { };\nview \"b\" { };\n").unwrap();
        sync_keyword(&mut file.nodes, "view", Vec::new(), Placement::Append);
        assert!(file.nodes.is_empty());
    }

    #[test]
    fn test_missing_source() {
        let mut config = Config::default();
        config.zones.push(Zone::new("a", ZoneType::Hint));
        assert!(matches!(config.to_file(), Err(Error::MissingSource)));

        let dir = tempfile::tempdir().unwrap();
        let err = config.save(dir.path().join("named.conf")).unwrap_err();
        assert!(matches!(err, Error::MissingSource));
        assert!(!dir.path().join("named.conf").exists());
    }

    #[test]
    fn test_json_config_has_no_source() {
        let mut config = Config::default();
        config.views.push(View::new("lan"));
        let restored = Config::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(restored, config);
        assert!(restored.source().is_none());
    }

    #[test]
    fn test_save_updates_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("named.conf");
        let mut config = Config::parse("options { recursion no; };\n").unwrap();
        config.set_recursion(true);
        config.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "options {\n\trecursion yes;\n};\n");
        assert_eq!(config.source().unwrap().render(), written);
    }
}
