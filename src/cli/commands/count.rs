//! hadith count - Total number of hadiths

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::emit_robot;
use crate::corpus::Catalog;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CountArgs {}

pub fn run(ctx: &AppContext, _args: &CountArgs) -> Result<()> {
    let count = ctx.store.count();
    if ctx.robot_mode {
        return emit_robot(serde_json::json!({ "count": count }));
    }
    println!("{count}");
    Ok(())
}
