//! Terminal user interface for browsing the corpus.
//!
//! Built on ratatui with the crossterm backend.

pub mod browse;

pub use browse::{BrowseOptions, BrowseTui, run_browse_tui};
