//! Request and response bodies.

use serde::{Deserialize, Serialize};

use crate::search::PageQuery;

/// Query string of `GET /search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text query; blank lists records in book order
    #[serde(default)]
    pub q: Option<String>,
    /// Exact book name to restrict the search to
    #[serde(default)]
    pub book: Option<String>,
    #[serde(flatten)]
    pub window: PageQuery,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: usize,
}
