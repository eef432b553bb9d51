//! hadith serve - HTTP API

use std::path::PathBuf;

use clap::Args;

use crate::api::{self, ServerOptions};
use crate::app::AppContext;
use crate::config::normalize_addr;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Listen address (default from server.addr, HADITH_ADDR or ADDR; `:8080` if unset)
    #[arg(long)]
    pub addr: Option<String>,

    /// Web UI directory served for unmatched paths
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &ServeArgs) -> Result<()> {
    let addr = args.addr.as_deref().unwrap_or(&ctx.config.server.addr);
    let options = ServerOptions {
        addr: normalize_addr(addr),
        static_dir: Some(args.static_dir.clone().unwrap_or_else(|| ctx.static_dir())),
        openapi_path: Some(ctx.openapi_path()),
        search_timeout_ms: ctx.config.search.timeout_ms,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(api::serve(ctx.store.clone(), options))
}
