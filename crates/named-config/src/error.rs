//! Error types for named-config

/// Result type for named-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in named-config operations
///
/// Decoding never fails; malformed fragments decode to empty values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration was not decoded from a syntax tree, so there is
    /// nothing to synchronize onto.
    #[error("No source tree: decode the configuration from a file before saving it")]
    MissingSource,

    /// Error from named-cst
    #[error(transparent)]
    Cst(#[from] named_cst::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
