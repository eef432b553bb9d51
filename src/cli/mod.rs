//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;

/// Hadith - load, browse and search hadith collections
#[derive(Parser, Debug)]
#[command(name = "hadith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// [DEPRECATED] Enable JSON output for machine consumption.
    /// Use --output-format=json or -m instead.
    #[arg(long, global = true, hide = true)]
    pub robot: bool,

    /// Output format (human, json, plain)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Enable machine-readable JSON output (shorthand for --output-format=json)
    #[arg(long, short = 'm', global = true)]
    pub machine: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/hadith/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of book documents (default: nearest `books/` above the working directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub books_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the effective output format.
    ///
    /// `--output-format` wins, then `--machine`/`--robot`, then human.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        if let Some(fmt) = self.output_format {
            return fmt;
        }
        if self.machine || self.robot {
            return OutputFormat::Json;
        }
        OutputFormat::Human
    }

    /// True when errors and results should be emitted as JSON.
    #[must_use]
    pub fn is_robot(&self) -> bool {
        self.output_format().is_machine_readable()
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List book names
    Books(commands::books::BooksArgs),

    /// Print the total number of hadiths
    Count(commands::count::CountArgs),

    /// Print one hadith as JSON
    Get(commands::get::GetArgs),

    /// Search hadith text and book names
    Search(commands::search::SearchArgs),

    /// Serve the HTTP API
    Serve(commands::serve::ServeArgs),

    /// Serve the JSON-RPC interface over stdio or TCP
    Rpc(commands::rpc::RpcArgs),

    /// Interactively browse and search hadiths (TUI)
    Browse(commands::browse::BrowseArgs),
}
