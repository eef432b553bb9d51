//! In-memory hadith corpus.
//!
//! Books are loaded from a directory of JSON documents, one document per
//! book, and published as an immutable [`Corpus`] snapshot. Front ends read
//! through the [`Catalog`] trait.

pub mod locate;
pub mod store;
pub mod types;

pub use locate::{discover_root, find_books_root};
pub use store::{Catalog, Corpus, CorpusStore};
pub use types::{Book, Hadith};
