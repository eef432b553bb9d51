//! Shared state for a single CLI invocation.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::corpus::{CorpusStore, discover_root, locate::BOOKS_DIR_NAME};
use crate::error::Result;

pub struct AppContext {
    /// Project root: holds `books/`, `web/` and `api/openapi.yaml`
    pub root: PathBuf,
    pub config: Config,
    pub store: Arc<CorpusStore>,
    pub output_format: OutputFormat,
    pub robot_mode: bool,
}

impl AppContext {
    /// Resolve configuration and load the corpus.
    ///
    /// A corpus that fails to load fails the whole invocation.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = discover_root();
        let config = Config::load(cli.config.as_deref(), &root)?;
        let books_dir = resolve_books_dir(cli, &config, &root);
        debug!(root = %root.display(), books_dir = %books_dir.display(), "resolved paths");

        let store = Arc::new(CorpusStore::open(books_dir)?);
        let output_format = cli.output_format();

        Ok(Self {
            root,
            config,
            store,
            output_format,
            robot_mode: output_format.is_machine_readable(),
        })
    }

    /// Static web directory, configured or `<root>/web`.
    #[must_use]
    pub fn static_dir(&self) -> PathBuf {
        self.config
            .server
            .static_dir
            .clone()
            .unwrap_or_else(|| self.root.join("web"))
    }

    /// API description file, configured or `<root>/api/openapi.yaml`.
    #[must_use]
    pub fn openapi_path(&self) -> PathBuf {
        self.config
            .server
            .openapi_path
            .clone()
            .unwrap_or_else(|| self.root.join("api").join("openapi.yaml"))
    }
}

fn resolve_books_dir(cli: &Cli, config: &Config, root: &std::path::Path) -> PathBuf {
    cli.books_dir
        .clone()
        .or_else(|| config.data.books_dir.clone())
        .unwrap_or_else(|| root.join(BOOKS_DIR_NAME))
}
