use serde::{Deserialize, Serialize};

use crate::StoreError;

pub type BookId = u64;

/// A single catalogue entry, as persisted and as returned over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier, assigned on creation
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Whether the book can currently be borrowed
    pub available: bool,
}

/// Id for the next book appended to `books`: one past the largest id in use,
/// or 1 for an empty collection.
pub fn next_id(books: &[Book]) -> Result<BookId, StoreError> {
    match books.iter().map(|book| book.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted { max }),
    }
}
