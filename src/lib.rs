//! hadith - load, browse and search hadith collections.
//!
//! The corpus is read once from a directory of JSON book documents and
//! served read-only through several front ends: a CLI, an HTTP API, a
//! line-delimited JSON-RPC service and a terminal browser.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod rpc;
pub mod search;
pub mod tui;

pub use error::{HadithError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
