//! Project root discovery.
//!
//! The project root is the directory holding `books/`; the web UI (`web/`)
//! and the API description (`api/openapi.yaml`) are resolved against it.

use std::path::{Path, PathBuf};

/// Directory name searched for when no books directory is configured.
pub const BOOKS_DIR_NAME: &str = "books";

/// Number of directories inspected, starting with the start directory.
pub const MAX_LEVELS: usize = 5;

/// Walk up from `start` looking for a directory that contains `books/`.
#[must_use]
pub fn find_books_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(MAX_LEVELS)
        .find(|dir| dir.join(BOOKS_DIR_NAME).is_dir())
        .map(Path::to_path_buf)
}

/// Project root to use when none is configured.
///
/// Searches upward from the working directory and falls back to `.`.
#[must_use]
pub fn discover_root() -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| find_books_root(&cwd))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_root_in_an_ancestor() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("books")).unwrap();
        let deep = tmp.path().join("a/b/c/d");
        std::fs::create_dir_all(&deep).unwrap();

        assert_eq!(find_books_root(&deep), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn stops_after_five_levels() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("books")).unwrap();
        let deep = tmp.path().join("1/2/3/4/5");
        std::fs::create_dir_all(&deep).unwrap();

        assert_eq!(find_books_root(&deep), None);
    }

    #[test]
    fn a_books_file_is_not_a_match() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("books"), "").unwrap();
        assert_eq!(find_books_root(tmp.path()), None);
    }
}
