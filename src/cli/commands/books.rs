//! hadith books - List book names

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::emit_robot;
use crate::corpus::Catalog;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct BooksArgs {}

pub fn run(ctx: &AppContext, _args: &BooksArgs) -> Result<()> {
    let books = ctx.store.books();
    if ctx.robot_mode {
        return emit_robot(books);
    }
    for book in books {
        println!("{book}");
    }
    Ok(())
}
