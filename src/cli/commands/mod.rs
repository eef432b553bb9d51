//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub mod books;
pub mod browse;
pub mod count;
pub mod get;
pub mod rpc;
pub mod search;
pub mod serve;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Books(args) => books::run(ctx, args),
        Commands::Count(args) => count::run(ctx, args),
        Commands::Get(args) => get::run(ctx, args),
        Commands::Search(args) => search::run(ctx, args),
        Commands::Serve(args) => serve::run(ctx, args),
        Commands::Rpc(args) => rpc::run(ctx, args),
        Commands::Browse(args) => browse::run(ctx, args),
    }
}
