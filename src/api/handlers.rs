//! HTTP request handlers and application state.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{AppendHeaders, IntoResponse, Response};
use tracing::{debug, warn};

use super::errors::ApiError;
use super::models::{CountResponse, SearchParams};
use crate::corpus::{Catalog, Hadith};
use crate::error::HadithError;
use crate::search::{paginate, scoped_records, search_or_browse};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub search_timeout: Duration,
}

impl AppState {
    pub fn new(catalog: Arc<dyn Catalog>, search_timeout: Duration) -> Self {
        Self { catalog, search_timeout }
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn list_books(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.books())
}

pub async fn count(State(state): State<AppState>) -> Json<CountResponse> {
    Json(CountResponse { count: state.catalog.count() })
}

/// `GET /search`: scored search, or browse order for a blank query.
///
/// The full hit list is computed on the blocking pool and raced against the
/// configured deadline. A search that loses the race keeps running to
/// completion in the background and its result is dropped.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let addressing = params.window.addressing();
    let query = params.q.unwrap_or_default();
    let book = params.book;
    let catalog = Arc::clone(&state.catalog);

    let task = tokio::task::spawn_blocking(move || {
        let records = scoped_records(catalog.as_ref(), book.as_deref());
        search_or_browse(&records, &query, 0)
    });

    let hits = match tokio::time::timeout(state.search_timeout, task).await {
        Ok(Ok(hits)) => hits,
        Ok(Err(err)) => return Err(ApiError::Internal(format!("search task failed: {err}"))),
        Err(_) => {
            let ms = u64::try_from(state.search_timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(timeout_ms = ms, "search deadline exceeded");
            return Err(HadithError::Timeout(ms).into());
        }
    };

    let page = paginate(&hits, addressing);
    debug!(total = page.meta.total, returned = page.items.len(), "search served");
    Ok((AppendHeaders(page.meta.headers()), Json(page.items.to_vec())).into_response())
}

/// `GET /hadith/` with nothing after the prefix.
pub async fn hadith_usage() -> ApiError {
    ApiError::BadRequest(USAGE.to_string())
}

/// `GET /hadith/{book}/{number}`
pub async fn get_hadith(
    State(state): State<AppState>,
    Path(rest): Path<String>,
) -> Result<Json<Hadith>, ApiError> {
    let (book, number) = parse_hadith_path(&rest)?;
    state
        .catalog
        .get(book, number)
        .map(Json)
        .ok_or_else(|| HadithError::HadithNotFound { book: book.to_string(), number }.into())
}

const USAGE: &str = "use /hadith/{book}/{number}";

fn parse_hadith_path(rest: &str) -> Result<(&str, i64), ApiError> {
    let parts: Vec<&str> = rest.split('/').collect();
    let [book, number] = parts.as_slice() else {
        return Err(ApiError::BadRequest(USAGE.to_string()));
    };
    let number = number
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest("invalid number".to_string()))?;
    Ok((*book, number))
}
