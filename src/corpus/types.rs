//! Record types for the hadith corpus.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single hadith entry.
///
/// `(book, number)` identifies a record; `number` is only unique inside its
/// book and says nothing about the record's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hadith {
    /// Owning book (the source document's base name)
    pub book: String,
    /// Per-book identifier from the source document
    pub number: i64,
    /// Original-language text
    #[serde(rename = "arab")]
    pub primary_text: String,
    /// Translated text
    #[serde(rename = "id")]
    pub translated_text: String,
}

/// One record as it appears inside a book document.
///
/// The book name is not stored in the document; it comes from the file name.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DocumentRecord {
    pub number: i64,
    pub arab: String,
    pub id: String,
}

impl DocumentRecord {
    pub(crate) fn into_hadith(self, book: &str) -> Hadith {
        Hadith {
            book: book.to_string(),
            number: self.number,
            primary_text: self.arab,
            translated_text: self.id,
        }
    }
}

/// A named, ordered collection of hadiths loaded from one document.
#[derive(Debug, Clone)]
pub struct Book {
    pub name: String,
    pub hadiths: Arc<[Hadith]>,
}

impl Book {
    /// Number of records in this book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hadiths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hadiths.is_empty()
    }

    /// Find a record by its number.
    ///
    /// Linear scan: books are small and numbers are neither dense nor sorted.
    #[must_use]
    pub fn find(&self, number: i64) -> Option<&Hadith> {
        self.hadiths.iter().find(|h| h.number == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hadith_serializes_with_document_field_names() {
        let h = Hadith {
            book: "bukhari".into(),
            number: 1,
            primary_text: "the sun rises".into(),
            translated_text: "matahari terbit".into(),
        };
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["book"], "bukhari");
        assert_eq!(json["number"], 1);
        assert_eq!(json["arab"], "the sun rises");
        assert_eq!(json["id"], "matahari terbit");
    }

    #[test]
    fn find_matches_number_not_position() {
        let hadiths: Vec<Hadith> = [30, 7, 12]
            .into_iter()
            .map(|n| Hadith {
                book: "muslim".into(),
                number: n,
                primary_text: String::new(),
                translated_text: format!("entry {n}"),
            })
            .collect();
        let book = Book { name: "muslim".into(), hadiths: hadiths.into() };

        assert_eq!(book.find(7).unwrap().translated_text, "entry 7");
        assert!(book.find(1).is_none());
        assert_eq!(book.len(), 3);
    }
}
