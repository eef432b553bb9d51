//! hadith rpc - JSON-RPC interface
//!
//! Speaks line-delimited JSON-RPC 2.0 on stdin/stdout, or on a TCP socket
//! when `--listen` is given.

use std::sync::Arc;

use clap::Args;

use crate::app::AppContext;
use crate::error::Result;
use crate::rpc::{self, RpcService};

#[derive(Args, Debug)]
pub struct RpcArgs {
    /// Listen on TCP instead of stdio (bare flag uses rpc.listen, default 127.0.0.1:50051)
    #[arg(long, value_name = "ADDR", num_args = 0..=1)]
    pub listen: Option<Option<String>>,
}

pub fn run(ctx: &AppContext, args: &RpcArgs) -> Result<()> {
    let service = RpcService::new(ctx.store.clone(), ctx.config.search.default_limit);
    match &args.listen {
        Some(addr) => {
            let addr = addr.as_deref().unwrap_or(&ctx.config.rpc.listen);
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(rpc::serve_tcp(Arc::new(service), addr))
        }
        None => rpc::serve_stdio(&service),
    }
}
