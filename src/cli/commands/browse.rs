//! hadith browse - Interactive terminal browser

use clap::Args;

use crate::app::AppContext;
use crate::error::Result;
use crate::tui::{BrowseOptions, run_browse_tui};

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Start restricted to this book
    #[arg(long, short)]
    pub book: Option<String>,

    /// Initial query; empty lists hadiths in book order
    pub query: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &BrowseArgs) -> Result<()> {
    let mut query = args.query.join(" ");
    if let Some(book) = &args.book {
        query = format!("book:{book} {query}").trim_end().to_string();
    }
    let options = BrowseOptions {
        initial_query: query,
        page_size: ctx.config.tui.page_size,
        trunc_width: ctx.config.tui.trunc_width,
    };
    run_browse_tui(ctx.store.clone(), options)
}
