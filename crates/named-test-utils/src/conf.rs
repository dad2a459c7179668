//! [`TestConf`]: a temporary directory holding one named.conf.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::fixture;

/// A temporary directory with a `named.conf` and assertion helpers.
///
/// # Example
///
/// ```rust
/// use named_test_utils::TestConf;
///
/// let conf = TestConf::with_text("options { recursion no; };\n");
/// conf.assert_contains("recursion no;");
/// ```
pub struct TestConf {
    temp_dir: TempDir,
}

impl TestConf {
    /// Write `text` as `named.conf` in a fresh temporary directory.
    pub fn with_text(text: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("named.conf"), text).unwrap();
        Self { temp_dir }
    }

    /// Copy a fixture from `test-fixtures/named` as `named.conf`.
    pub fn with_fixture(name: &str) -> Self {
        Self::with_text(&fixture(name))
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the configuration file.
    pub fn path(&self) -> PathBuf {
        self.root().join("named.conf")
    }

    /// Current contents of the configuration file.
    pub fn read(&self) -> String {
        fs::read_to_string(self.path()).unwrap()
    }

    /// Assert that the configuration file contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_contains(&self, content: &str) {
        let text = self.read();
        assert!(
            text.contains(content),
            "named.conf does not contain {content:?}.\nActual content:\n{text}"
        );
    }

    /// Assert that the configuration file does not contain `content`.
    pub fn assert_not_contains(&self, content: &str) {
        let text = self.read();
        assert!(
            !text.contains(content),
            "named.conf unexpectedly contains {content:?}.\nActual content:\n{text}"
        );
    }
}
