//! User settings for namedctl
//!
//! Read from `<config_dir>/namedctl/config.toml` unless `--config` names
//! another file:
//!
//! ```toml
//! indent = "    "
//! placement = "in-place"
//! preserve-unknown = true
//! ```
//!
//! Command-line flags override values from the file.

use std::path::{Path, PathBuf};

use named_config::{DecodeOptions, Placement, SyncOptions};
use named_cst::RenderStyle;
use serde::Deserialize;

use crate::error::{CliError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// One level of indentation in rebuilt blocks
    pub indent: String,
    pub placement: Placement,
    /// Keep unrecognized statements inside modeled blocks
    pub preserve_unknown: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            placement: Placement::Append,
            preserve_unknown: true,
        }
    }
}

impl Settings {
    /// Platform settings file, e.g. `~/.config/namedctl/config.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("namedctl").join("config.toml"))
    }

    /// Load settings from `explicit`, or from the default location.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::user(format!("Cannot read settings file {}: {e}", path.display()))
        })?;
        let settings = toml::from_str(&text).map_err(|source| CliError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            preserve_unknown: self.preserve_unknown,
        }
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            placement: self.placement,
        }
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle::with_indent(self.indent.clone())
    }
}
