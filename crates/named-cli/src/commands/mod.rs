//! Command implementations for named-cli

pub mod check;
pub mod fmt;
pub mod recursion;
pub mod show;
pub mod zone;

pub use check::run_check;
pub use fmt::run_fmt;
pub use recursion::run_recursion;
pub use show::run_show;
pub use zone::{run_zone_add, run_zone_list, run_zone_remove};
