//! Typed projection of named.conf
//!
//! [`Config`] is a typed view over a lossless [`named_cst::File`]. Decoding
//! reads the statements the model understands; applying the model back
//! rebuilds exactly those statements and leaves every other node of the tree
//! byte-identical.
//!
//! ```
//! use named_config::{Config, Zone, ZoneType};
//!
//! let source = "// resolver\nacl lan { 10.0.0.0/8; };\nstatistics-channels { };\n";
//! let mut config = Config::parse(source).unwrap();
//! assert_eq!(config.acls[0].name, "lan");
//!
//! config.upsert_zone(Zone::new("example.com", ZoneType::Primary));
//! let text = config.to_file().unwrap().render();
//! assert!(text.contains("statistics-channels { };"));
//! assert!(text.contains("zone \"example.com\" {\n\ttype primary;\n};"));
//! ```

pub mod api;
pub mod build;
pub mod codec;
pub mod decode;
pub mod error;
pub mod header;
pub mod model;
pub mod options;
pub mod sync;

pub use decode::{DecodeReport, DroppedFragment};
pub use error::{Error, Result};
pub use model::*;
pub use options::{DecodeOptions, Placement, SyncOptions};
pub use sync::{MODELED_KEYWORDS, sync_keyword};
