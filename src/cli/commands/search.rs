//! hadith search - Search hadith text and book names
//!
//! Without window flags the search is capped at `--limit` (default
//! `search.default_limit`). With `--offset`, `--page` or `--page-size` the
//! full hit list is computed and a window is cut from it.

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, one_line};
use crate::error::Result;
use crate::search::{self, PageMeta, PageQuery, SearchHit, paginate, scoped_records};

/// Display width for the translated and primary text lines.
const LINE_WIDTH: usize = 240;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Maximum number of results (0 = unlimited)
    #[arg(long, short)]
    pub limit: Option<usize>,

    /// Only search this book
    #[arg(long, short)]
    pub book: Option<String>,

    /// Skip this many hits (offset mode, page size from --limit)
    #[arg(long)]
    pub offset: Option<usize>,

    /// 1-based page number (page mode)
    #[arg(long)]
    pub page: Option<usize>,

    /// Hits per page (page mode)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl SearchArgs {
    #[must_use]
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }

    fn is_windowed(&self) -> bool {
        self.offset.is_some() || self.page.is_some() || self.page_size.is_some()
    }

    fn page_query(&self) -> PageQuery {
        PageQuery {
            limit: self.limit.map(|n| n.to_string()),
            offset: self.offset.map(|n| n.to_string()),
            page: self.page.map(|n| n.to_string()),
            page_size: self.page_size.map(|n| n.to_string()),
        }
    }
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    book: Option<&'a str>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<PageMeta>,
    results: &'a [SearchHit],
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let query = args.query_text();
    let records = scoped_records(ctx.store.as_ref(), args.book.as_deref());

    let (hits, meta) = if args.is_windowed() {
        let all = search::search(&records, &query, 0);
        let page = paginate(&all, args.page_query().addressing());
        (page.items.to_vec(), Some(page.meta))
    } else {
        let limit = args.limit.unwrap_or(ctx.config.search.default_limit);
        (search::search(&records, &query, limit), None)
    };
    tracing::debug!(query = %query, hits = hits.len(), "search finished");

    if ctx.robot_mode {
        return emit_robot(SearchOutput {
            query,
            book: args.book.as_deref(),
            count: hits.len(),
            page: meta,
            results: &hits,
        });
    }

    for hit in &hits {
        let header = format!("{} #{}", hit.hadith.book, hit.hadith.number);
        println!("{} [score {}]", header.bold(), hit.score);
        println!("ID: {}", one_line(&hit.hadith.translated_text, LINE_WIDTH));
        println!("AR: {}\n", one_line(&hit.hadith.primary_text, LINE_WIDTH));
    }
    if let Some(meta) = meta {
        let footer = format!("{} of {} hits", hits.len(), meta.total);
        println!("{}", footer.dimmed());
    }
    Ok(())
}
