//! Persistence for the shelf book collection.
//!
//! The whole collection is loaded and saved as one unit. Implementations do
//! not lock: two concurrent read-modify-write cycles race and the later
//! `save` wins.

use std::sync::Arc;

use async_trait::async_trait;

pub mod error;
pub mod file;
pub mod memory;
pub mod model;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use model::{next_id, Book, BookId};

/// Shared handle to a store, as held by HTTP handlers.
pub type SharedStore = Arc<dyn BookStore>;

/// Load/save access to the full, ordered book collection.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Read the whole collection. Read failures are absorbed by the
    /// implementation and yield an empty collection.
    async fn load(&self) -> Vec<Book>;

    /// Replace the persisted collection with `books`.
    async fn save(&self, books: &[Book]) -> Result<(), StoreError>;
}
