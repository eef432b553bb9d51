//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A project root with a `books/` directory holding two small books.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let books = dir.path().join("books");
        fs::create_dir_all(&books).unwrap();
        fs::write(
            books.join("bukhari.json"),
            r#"[
                {"number": 1, "arab": "the sun rises", "id": "matahari terbit"},
                {"number": 2, "arab": "the moon sets", "id": "bulan terbenam"}
            ]"#,
        )
        .unwrap();
        fs::write(
            books.join("muslim.json"),
            r#"[{"number": 1, "arab": "the sun rises", "id": "matahari terbenam"}]"#,
        )
        .unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn books_dir(&self) -> PathBuf {
        self.dir.path().join("books")
    }

    pub fn write_book(&self, name: &str, body: &str) {
        fs::write(self.books_dir().join(name), body).unwrap();
    }
}
