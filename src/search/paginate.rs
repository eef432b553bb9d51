//! Result windowing for front ends.
//!
//! Three addressing modes are accepted, checked in this order:
//! offset + limit, page + page size, and a legacy head-of-list limit.
//! Window sizes default to [`DEFAULT_PAGE_SIZE`] and are capped at
//! [`MAX_PAGE_SIZE`]. Malformed or out-of-range parameters fall back to the
//! defaults rather than failing the request.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 200;

/// Raw window parameters as they arrive from a query string.
///
/// Values are kept as strings so malformed input can be told apart from an
/// absent parameter; an empty string counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Resolved window request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Addressing {
    Offset { offset: usize, limit: usize },
    Page { page: usize, page_size: usize },
    Head { limit: usize },
}

impl PageQuery {
    /// Resolve the parameters into one addressing mode.
    #[must_use]
    pub fn addressing(&self) -> Addressing {
        let limit = present(self.limit.as_deref());
        if let Some(offset) = present(self.offset.as_deref()) {
            return Addressing::Offset {
                offset: offset.parse().unwrap_or(0),
                limit: window_size(limit),
            };
        }

        let page = present(self.page.as_deref());
        let page_size = present(self.page_size.as_deref());
        if page.is_some() || page_size.is_some() {
            return Addressing::Page {
                page: page.and_then(positive).unwrap_or(1),
                page_size: window_size(page_size),
            };
        }

        Addressing::Head { limit: window_size(limit) }
    }
}

/// Window metadata reported next to (never inside) the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: usize,
    #[serde(flatten)]
    pub addressing: Addressing,
}

impl PageMeta {
    /// Header name/value pairs describing this window.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![("X-Total-Count", self.total.to_string())];
        match self.addressing {
            Addressing::Offset { offset, limit } => {
                headers.push(("X-Offset", offset.to_string()));
                headers.push(("X-Limit", limit.to_string()));
            }
            Addressing::Page { page, page_size } => {
                headers.push(("X-Page", page.to_string()));
                headers.push(("X-Page-Size", page_size.to_string()));
            }
            Addressing::Head { limit } => headers.push(("X-Limit", limit.to_string())),
        }
        headers
    }
}

/// A window into an ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub meta: PageMeta,
}

/// Cut the window described by `addressing` out of `items`.
///
/// The effective offset is clamped to the sequence length, so an offset or
/// page past the end yields an empty window with the true total.
#[must_use]
pub fn paginate<T>(items: &[T], addressing: Addressing) -> Page<'_, T> {
    let total = items.len();
    let (start, len, effective) = match addressing {
        Addressing::Offset { offset, limit } => {
            let offset = offset.min(total);
            (offset, limit, Addressing::Offset { offset, limit })
        }
        Addressing::Page { page, page_size } => {
            let start = page.saturating_sub(1).saturating_mul(page_size);
            (start.min(total), page_size, addressing)
        }
        Addressing::Head { limit } => (0, limit, addressing),
    };
    let end = start.saturating_add(len).min(total);

    Page {
        items: &items[start..end],
        meta: PageMeta { total, addressing: effective },
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

fn positive(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|&n| n > 0)
}

fn window_size(raw: Option<&str>) -> usize {
    raw.and_then(positive)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> PageQuery {
        let mut q = PageQuery::default();
        for (k, v) in pairs {
            let v = Some((*v).to_string());
            match *k {
                "limit" => q.limit = v,
                "offset" => q.offset = v,
                "page" => q.page = v,
                "page_size" => q.page_size = v,
                other => panic!("unknown key {other}"),
            }
        }
        q
    }

    #[test]
    fn offset_wins_over_page() {
        let q = query(&[("offset", "10"), ("limit", "5"), ("page", "3")]);
        assert_eq!(q.addressing(), Addressing::Offset { offset: 10, limit: 5 });
    }

    #[test]
    fn page_wins_over_legacy_limit() {
        let q = query(&[("page_size", "20"), ("limit", "5")]);
        assert_eq!(q.addressing(), Addressing::Page { page: 1, page_size: 20 });
    }

    #[test]
    fn defaults_and_caps() {
        assert_eq!(PageQuery::default().addressing(), Addressing::Head { limit: 50 });
        assert_eq!(
            query(&[("limit", "1000")]).addressing(),
            Addressing::Head { limit: MAX_PAGE_SIZE }
        );
        assert_eq!(
            query(&[("page", "2"), ("page_size", "999")]).addressing(),
            Addressing::Page { page: 2, page_size: 200 }
        );
    }

    #[test]
    fn malformed_values_fall_back() {
        assert_eq!(
            query(&[("offset", "-4"), ("limit", "zero")]).addressing(),
            Addressing::Offset { offset: 0, limit: 50 }
        );
        assert_eq!(
            query(&[("page", "0")]).addressing(),
            Addressing::Page { page: 1, page_size: 50 }
        );
        assert_eq!(query(&[("limit", "0")]).addressing(), Addressing::Head { limit: 50 });
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let q = query(&[("offset", ""), ("page", ""), ("limit", "7")]);
        assert_eq!(q.addressing(), Addressing::Head { limit: 7 });
    }

    #[test]
    fn page_past_end_is_empty_with_total() {
        let items: Vec<u32> = (0..30).collect();
        let page = paginate(&items, Addressing::Page { page: 1000, page_size: 10 });
        assert!(page.items.is_empty());
        assert_eq!(page.meta.total, 30);
    }

    #[test]
    fn offset_past_end_is_clamped() {
        let items: Vec<u32> = (0..5).collect();
        let page = paginate(&items, Addressing::Offset { offset: 99, limit: 10 });
        assert!(page.items.is_empty());
        assert_eq!(page.meta.addressing, Addressing::Offset { offset: 5, limit: 10 });
    }

    #[test]
    fn windows_are_contiguous_slices() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(
            paginate(&items, Addressing::Page { page: 3, page_size: 10 }).items,
            &[20, 21, 22, 23, 24]
        );
        assert_eq!(
            paginate(&items, Addressing::Offset { offset: 3, limit: 2 }).items,
            &[3, 4]
        );
        assert_eq!(paginate(&items, Addressing::Head { limit: 4 }).items.len(), 4);
    }

    #[test]
    fn headers_follow_mode() {
        let items = [1, 2, 3];
        let names = |a| {
            paginate(&items, a)
                .meta
                .headers()
                .into_iter()
                .map(|(k, _)| k)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            names(Addressing::Offset { offset: 0, limit: 1 }),
            vec!["X-Total-Count", "X-Offset", "X-Limit"]
        );
        assert_eq!(
            names(Addressing::Page { page: 1, page_size: 1 }),
            vec!["X-Total-Count", "X-Page", "X-Page-Size"]
        );
        assert_eq!(names(Addressing::Head { limit: 1 }), vec!["X-Total-Count", "X-Limit"]);
    }
}
