//! Lossless concrete syntax tree for named.conf
//!
//! A parsed [`File`] is an ordered list of [`Node`]s: statements and the raw
//! text between them. Parsed nodes render back byte for byte; statements
//! built with [`Statement::simple`] or [`Statement::block`] render in a
//! canonical layout.
//!
//! ```
//! use named_cst::{File, Node, Statement};
//!
//! let mut file = File::parse("# keep me\nlogging { };\n").unwrap();
//! file.nodes.retain(|n| n.keyword() != Some("logging"));
//! file.nodes.push(Node::Statement(Statement::simple("include \"extra.conf\"")));
//! assert_eq!(file.render(), "# keep me\n\ninclude \"extra.conf\";\n");
//! ```

pub mod error;
pub mod io;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod render;

pub use error::{Error, Result};
pub use io::write_atomic;
pub use lexer::{find_group, strip_comments};
pub use node::{File, Node, Raw, Statement};
pub use parser::parse;
pub use render::RenderStyle;
