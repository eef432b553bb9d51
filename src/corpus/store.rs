//! Corpus loading and the shared read-only store.
//!
//! A [`Corpus`] is built completely from a books directory and never
//! mutated afterwards. [`CorpusStore`] publishes the current snapshot behind
//! an `Arc` so readers clone a pointer and never see a partial load; a reload
//! builds a fresh corpus first and swaps it in only on success.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::types::{Book, DocumentRecord, Hadith};
use crate::error::{HadithError, Result};

/// File extension (case-insensitive) recognized as a book document.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Read access shared by every front end.
///
/// Implemented by [`Corpus`] snapshots and by the reloadable
/// [`CorpusStore`]; adapters depend only on this trait.
pub trait Catalog: Send + Sync {
    /// Book names in ascending lexicographic order.
    fn books(&self) -> Vec<String>;

    /// Total number of records across all books.
    fn count(&self) -> usize;

    /// Look up a record by `(book, number)`.
    fn get(&self, book: &str, number: i64) -> Option<Hadith>;

    /// All records, book-major in book-name order, each book in load order.
    fn all(&self) -> Arc<[Hadith]>;

    /// Records of a single book in load order.
    fn book(&self, name: &str) -> Option<Arc<[Hadith]>>;
}

/// An immutable, fully loaded set of books.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    books: Vec<Book>,
    by_name: HashMap<String, usize>,
    all: Arc<[Hadith]>,
}

impl Corpus {
    /// Load every `*.json` document in `dir`.
    ///
    /// The whole load fails on the first unreadable or malformed document.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut found: BTreeMap<String, (PathBuf, Vec<Hadith>)> = BTreeMap::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|err| HadithError::ReadBooksDir {
                path: dir.to_path_buf(),
                source: err.into(),
            })?;
            if entry.file_type().is_dir() {
                continue;
            }
            let path = entry.path();
            let Some(book) = book_name(path) else {
                continue;
            };

            let hadiths = load_document(path, &book)?;
            debug!(book = %book, records = hadiths.len(), path = %path.display(), "loaded book");

            if let Some((first, _)) = found.get(&book) {
                return Err(HadithError::DuplicateBook {
                    book,
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }
            found.insert(book, (path.to_path_buf(), hadiths));
        }

        let corpus = Self::from_books(found.into_iter().map(|(name, (_, hadiths))| (name, hadiths)));
        info!(
            dir = %dir.display(),
            books = corpus.books.len(),
            records = corpus.all.len(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    /// Build a corpus from in-memory books.
    ///
    /// Each record's `book` field is set to the name it is filed under. A
    /// repeated name replaces the earlier book.
    pub fn from_books<I, S>(books: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Hadith>)>,
        S: Into<String>,
    {
        let sorted: BTreeMap<String, Vec<Hadith>> = books
            .into_iter()
            .map(|(name, hadiths)| (name.into(), hadiths))
            .collect();

        let mut out = Vec::with_capacity(sorted.len());
        let mut flat = Vec::new();
        for (name, mut hadiths) in sorted {
            for h in &mut hadiths {
                h.book.clone_from(&name);
            }
            flat.extend(hadiths.iter().cloned());
            out.push(Book { name, hadiths: hadiths.into() });
        }

        let by_name = out
            .iter()
            .enumerate()
            .map(|(idx, b)| (b.name.clone(), idx))
            .collect();

        Self { books: out, by_name, all: flat.into() }
    }

    /// Borrow a book by name.
    #[must_use]
    pub fn find_book(&self, name: &str) -> Option<&Book> {
        self.by_name.get(name).map(|&idx| &self.books[idx])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

impl Catalog for Corpus {
    fn books(&self) -> Vec<String> {
        self.books.iter().map(|b| b.name.clone()).collect()
    }

    fn count(&self) -> usize {
        self.all.len()
    }

    fn get(&self, book: &str, number: i64) -> Option<Hadith> {
        self.find_book(book)?.find(number).cloned()
    }

    fn all(&self) -> Arc<[Hadith]> {
        Arc::clone(&self.all)
    }

    fn book(&self, name: &str) -> Option<Arc<[Hadith]>> {
        self.find_book(name).map(|b| Arc::clone(&b.hadiths))
    }
}

/// Reloadable holder of the current [`Corpus`] snapshot.
#[derive(Debug)]
pub struct CorpusStore {
    source_dir: PathBuf,
    current: RwLock<Arc<Corpus>>,
}

impl CorpusStore {
    /// Load `dir` and publish it as the first snapshot.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let source_dir = dir.into();
        let corpus = Corpus::load(&source_dir)?;
        Ok(Self {
            source_dir,
            current: RwLock::new(Arc::new(corpus)),
        })
    }

    /// The currently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Corpus> {
        Arc::clone(&self.current.read())
    }

    /// Reload from the source directory and swap the new snapshot in.
    ///
    /// On failure the previous snapshot stays published.
    pub fn reload(&self) -> Result<Arc<Corpus>> {
        let fresh = match Corpus::load(&self.source_dir) {
            Ok(corpus) => Arc::new(corpus),
            Err(err) => {
                warn!(dir = %self.source_dir.display(), error = %err, "reload failed, keeping previous corpus");
                return Err(err);
            }
        };
        *self.current.write() = Arc::clone(&fresh);
        info!(records = fresh.all.len(), "corpus reloaded");
        Ok(fresh)
    }
}

impl Catalog for CorpusStore {
    fn books(&self) -> Vec<String> {
        self.snapshot().books()
    }

    fn count(&self) -> usize {
        self.snapshot().count()
    }

    fn get(&self, book: &str, number: i64) -> Option<Hadith> {
        self.snapshot().get(book, number)
    }

    fn all(&self) -> Arc<[Hadith]> {
        self.snapshot().all()
    }

    fn book(&self, name: &str) -> Option<Arc<[Hadith]>> {
        self.snapshot().book(name)
    }
}

/// Book name for a document path, or `None` if it is not a book document.
fn book_name(path: &Path) -> Option<String> {
    let is_document = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION));
    if !is_document {
        return None;
    }
    match path.file_stem().and_then(OsStr::to_str) {
        Some(stem) if !stem.is_empty() => Some(stem.to_string()),
        _ => {
            warn!(path = %path.display(), "skipping document with non UTF-8 name");
            None
        }
    }
}

fn load_document(path: &Path, book: &str) -> Result<Vec<Hadith>> {
    let file = File::open(path).map_err(|source| HadithError::OpenDocument {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<DocumentRecord> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| HadithError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(records.into_iter().map(|r| r.into_hadith(book)).collect())
}
