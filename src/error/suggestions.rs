//! Context-aware error suggestions.
//!
//! Complements the static suggestions in the `codes` module with hints that
//! mention the offending book, document or parameter.

use serde_json::Value;

use super::codes::ErrorCode;

/// Generate a context-aware suggestion for an error.
pub fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    match code {
        ErrorCode::HadithNotFound => suggest_hadith_not_found(context),
        ErrorCode::DocumentInvalid => suggest_document_invalid(context),
        ErrorCode::DuplicateBook => suggest_duplicate_book(context),
        _ => code.suggestion().to_string(),
    }
}

fn suggest_hadith_not_found(context: Option<&Value>) -> String {
    let Some(book) = context
        .and_then(|c| c.get("book"))
        .and_then(Value::as_str)
    else {
        return ErrorCode::HadithNotFound.suggestion().to_string();
    };

    format!(
        "No such entry in '{book}'. Try:\n  - `hadith search --book {book} <query>` to find it by text\n  - `hadith books` to check the book name"
    )
}

fn suggest_document_invalid(context: Option<&Value>) -> String {
    match context.and_then(|c| c.get("path")).and_then(Value::as_str) {
        Some(path) => format!(
            "Fix the JSON in {path}. {}",
            ErrorCode::DocumentInvalid.suggestion()
        ),
        None => ErrorCode::DocumentInvalid.suggestion().to_string(),
    }
}

fn suggest_duplicate_book(context: Option<&Value>) -> String {
    match context.and_then(|c| c.get("book")).and_then(Value::as_str) {
        Some(book) => format!(
            "Two documents are named '{book}' (extension case differs). Keep only one of them"
        ),
        None => ErrorCode::DuplicateBook.suggestion().to_string(),
    }
}
