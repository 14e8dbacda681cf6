use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{Book, BookStore, StoreError};

/// Keeps the collection as a pretty-printed JSON array in a single file.
///
/// Every `save` rewrites the file in place. There is no temp-file rename, so
/// a crash mid-write can leave a truncated file behind; the next `load` then
/// logs the parse failure and starts from an empty collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<Book>, StoreError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if data.is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&data).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl BookStore for JsonFileStore {
    async fn load(&self) -> Vec<Book> {
        match self.read().await {
            Ok(books) => books,
            Err(err) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %err,
                    "book collection unreadable, continuing with an empty collection"
                );
                Vec::new()
            }
        }
    }

    async fn save(&self, books: &[Book]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(books)?;

        tokio::fs::write(&self.path, encoded)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            count = books.len(),
            "book collection saved"
        );
        Ok(())
    }
}
