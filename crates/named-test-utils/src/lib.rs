//! Shared test utilities for the named workspace.
//!
//! This crate provides the configuration fixtures used across crate test
//! suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`] - named.conf samples from `test-fixtures/named`
//! - [`conf`] - [`TestConf`] temporary directory holding a named.conf

pub mod conf;
pub mod fixtures;

pub use conf::TestConf;
pub use fixtures::{fixture, fixture_path};
