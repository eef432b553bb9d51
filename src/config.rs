use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HadithError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "HADITH_CONFIG";

/// Project-level config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "hadith.toml";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
    pub rpc: RpcConfig,
    pub search: SearchConfig,
    pub tui: TuiConfig,
}

impl Config {
    /// Load configuration for a project rooted at `root`.
    ///
    /// An explicit file (argument or `HADITH_CONFIG`) replaces the global and
    /// project files. Environment overrides are applied last.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&root.join(PROJECT_CONFIG_FILE))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Parse a TOML document and merge it over the defaults.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| HadithError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match dirs::config_dir() {
            Some(dir) => Self::load_patch(&dir.join("hadith/config.toml")),
            None => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|err| {
            HadithError::Config(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            HadithError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.data {
            self.data.merge(patch);
        }
        if let Some(patch) = patch.server {
            self.server.merge(patch);
        }
        if let Some(patch) = patch.rpc {
            self.rpc.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.tui {
            self.tui.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply `HADITH_*` overrides read through `lookup`.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let env = EnvSource { lookup };

        if let Some(value) = env.path("HADITH_BOOKS_DIR") {
            self.data.books_dir = Some(value);
        }

        // HADITH_ADDR wins over the bare ADDR older deployments set.
        if let Some(value) = env.string("HADITH_ADDR").or_else(|| env.string("ADDR")) {
            self.server.addr = value;
        }
        if let Some(value) = env.path("HADITH_STATIC_DIR") {
            self.server.static_dir = Some(value);
        }

        if let Some(value) = env.string("HADITH_RPC_ADDR") {
            self.rpc.listen = value;
        }

        if let Some(value) = env.usize("HADITH_SEARCH_LIMIT")? {
            self.search.default_limit = value;
        }
        if let Some(value) = env.u64("HADITH_SEARCH_TIMEOUT_MS")? {
            self.search.timeout_ms = value;
        }

        if let Some(value) = env.usize("HADITH_TUI_PAGE_SIZE")? {
            self.tui.page_size = value;
        }
        if let Some(value) = env.usize("HADITH_TUI_TRUNC_WIDTH")? {
            self.tui.trunc_width = value;
        }

        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.tui.page_size == 0 {
            return Err(HadithError::Config("tui.page_size must be at least 1".to_string()));
        }
        if self.search.timeout_ms == 0 {
            return Err(HadithError::Config("search.timeout_ms must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataConfig {
    /// Books directory; discovered from the working directory when unset
    pub books_dir: Option<PathBuf>,
}

impl DataConfig {
    fn merge(&mut self, patch: DataPatch) {
        if let Some(value) = patch.books_dir {
            self.books_dir = Some(value);
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    /// Web UI directory; `<root>/web` when unset
    pub static_dir: Option<PathBuf>,
    /// API description; `<root>/api/openapi.yaml` when unset
    pub openapi_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: ":8080".to_string(),
            static_dir: None,
            openapi_path: None,
        }
    }
}

impl ServerConfig {
    fn merge(&mut self, patch: ServerPatch) {
        if let Some(value) = patch.addr {
            self.addr = value;
        }
        if let Some(value) = patch.static_dir {
            self.static_dir = Some(value);
        }
        if let Some(value) = patch.openapi_path {
            self.openapi_path = Some(value);
        }
    }
}

#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub listen: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:50051".to_string(),
        }
    }
}

impl RpcConfig {
    fn merge(&mut self, patch: RpcPatch) {
        if let Some(value) = patch.listen {
            self.listen = value;
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Result cap for `hadith search` and RPC searches without a limit
    pub default_limit: usize,
    /// Deadline for a single HTTP search
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            timeout_ms: 5000,
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.default_limit {
            self.default_limit = value;
        }
        if let Some(value) = patch.timeout_ms {
            self.timeout_ms = value;
        }
    }
}

#[derive(Debug, Clone)]
pub struct TuiConfig {
    pub page_size: usize,
    pub trunc_width: usize,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            trunc_width: 140,
        }
    }
}

impl TuiConfig {
    fn merge(&mut self, patch: TuiPatch) {
        if let Some(value) = patch.page_size {
            self.page_size = value;
        }
        if let Some(value) = patch.trunc_width {
            self.trunc_width = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub data: Option<DataPatch>,
    pub server: Option<ServerPatch>,
    pub rpc: Option<RpcPatch>,
    pub search: Option<SearchPatch>,
    pub tui: Option<TuiPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DataPatch {
    pub books_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ServerPatch {
    pub addr: Option<String>,
    pub static_dir: Option<PathBuf>,
    pub openapi_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RpcPatch {
    pub listen: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub default_limit: Option<usize>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TuiPatch {
    pub page_size: Option<usize>,
    pub trunc_width: Option<usize>,
}

/// Turn a listen address into something a socket can bind.
///
/// A bare `:port` binds every interface.
#[must_use]
pub fn normalize_addr(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}

struct EnvSource<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> EnvSource<F> {
    fn string(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.is_empty())
    }

    fn path(&self, key: &str) -> Option<PathBuf> {
        self.string(key).map(PathBuf::from)
    }

    fn usize(&self, key: &str) -> Result<Option<usize>> {
        match self.string(key) {
            Some(value) => value.parse::<usize>().map(Some).map_err(|err| {
                HadithError::Config(format!("invalid {key} value {value}: {err}"))
            }),
            None => Ok(None),
        }
    }

    fn u64(&self, key: &str) -> Result<Option<u64>> {
        match self.string(key) {
            Some(value) => value.parse::<u64>().map(Some).map_err(|err| {
                HadithError::Config(format!("invalid {key} value {value}: {err}"))
            }),
            None => Ok(None),
        }
    }
}
