//! Access to the named.conf samples under `test-fixtures/named`.

use std::fs;
use std::path::PathBuf;

/// Every fixture, for tests that run over all of them.
pub const ALL: [&str; 3] = ["full.conf", "minimal.conf", "unmodeled.conf"];

/// Absolute path of a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/named")
        .join(name)
}

/// Contents of a fixture file.
///
/// # Panics
/// Panics if the fixture does not exist.
pub fn fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Could not read fixture {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fixtures_readable() {
        for name in ALL {
            assert!(!fixture(name).is_empty(), "{name} is empty");
        }
    }
}
