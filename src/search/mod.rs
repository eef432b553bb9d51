//! Search over the loaded corpus.
//!
//! - [`engine`]: weighted substring scoring, sequential and parallel
//! - [`paginate`]: offset/page/legacy windowing of an ordered hit list

pub mod engine;
pub mod paginate;

use std::sync::Arc;

use crate::corpus::{Catalog, Hadith};

pub use engine::{
    PARALLEL_THRESHOLD, SearchHit, browse, parallel_search, parallel_search_with_workers, search,
    search_or_browse, sequential_search,
};
pub use paginate::{Addressing, Page, PageMeta, PageQuery, paginate};

/// Records to search: one book when `book` is set, otherwise everything.
///
/// An unknown book yields an empty slice.
#[must_use]
pub fn scoped_records(catalog: &dyn Catalog, book: Option<&str>) -> Arc<[Hadith]> {
    match book.filter(|b| !b.is_empty()) {
        Some(name) => catalog.book(name).unwrap_or_else(|| Arc::from(Vec::new())),
        None => catalog.all(),
    }
}
