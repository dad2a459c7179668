//! Decode and sync options

use serde::{Deserialize, Serialize};

/// Options for projecting a syntax tree onto the typed model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Keep unrecognized child statements of every modeled block in its
    /// `other` list. When false, only `options` keeps them and the rest are
    /// listed in the [`DecodeReport`](crate::DecodeReport).
    pub preserve_unknown: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            preserve_unknown: true,
        }
    }
}

/// Where rebuilt statements go in the node list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Remove old statements of a keyword, append the rebuilt ones at the end
    #[default]
    Append,
    /// Put the rebuilt statements where the first old one of the keyword was
    InPlace,
}

/// Options for synchronizing the typed model back onto a syntax tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    pub placement: Placement,
}

impl SyncOptions {
    pub fn in_place() -> Self {
        Self {
            placement: Placement::InPlace,
        }
    }
}
