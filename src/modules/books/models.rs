use serde::{Deserialize, Serialize};
use shelf_http::error::{AppError, INVALID_INPUT};
use shelf_store::{Book, BookId};

/// Request model for creating a new book.
///
/// Every field is optional at the wire level so that a missing field is a
/// validation failure rather than a decoding failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub available: Option<bool>,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub available: bool,
}

impl CreateBook {
    /// Require a non-empty title and author and an explicit `available`
    /// (`false` counts as present).
    pub fn validate(self) -> Result<NewBook, AppError> {
        let title = self.title.filter(|t| !t.is_empty());
        let author = self.author.filter(|a| !a.is_empty());

        match (title, author, self.available) {
            (Some(title), Some(author), Some(available)) => Ok(NewBook {
                title,
                author,
                available,
            }),
            _ => Err(AppError::validation(INVALID_INPUT)),
        }
    }
}

impl NewBook {
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            available: self.available,
        }
    }
}

/// Partial update: only fields present in the body are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub available: Option<bool>,
}

impl UpdateBook {
    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(available) = self.available {
            book.available = available;
        }
    }
}

/// Confirmation body for successful deletes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(title: Option<&str>, author: Option<&str>, available: Option<bool>) -> CreateBook {
        CreateBook {
            title: title.map(str::to_string),
            author: author.map(str::to_string),
            available,
        }
    }

    #[test]
    fn complete_request_validates() {
        let book = create(Some("Dune"), Some("Herbert"), Some(false))
            .validate()
            .unwrap();
        assert_eq!(
            book.into_book(3),
            Book {
                id: 3,
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
                available: false,
            }
        );
    }

    #[test]
    fn missing_or_empty_fields_are_rejected() {
        let cases = [
            create(None, Some("Herbert"), Some(true)),
            create(Some(""), Some("Herbert"), Some(true)),
            create(Some("Dune"), None, Some(true)),
            create(Some("Dune"), Some(""), Some(true)),
            create(Some("Dune"), Some("Herbert"), None),
        ];

        for case in cases {
            let err = case.validate().unwrap_err();
            assert!(matches!(err, AppError::Validation { ref message } if message == INVALID_INPUT));
        }
    }

    #[test]
    fn update_touches_only_present_fields() {
        let mut book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            available: true,
        };

        UpdateBook {
            available: Some(false),
            ..UpdateBook::default()
        }
        .apply(&mut book);

        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Herbert");
        assert!(!book.available);
    }
}
