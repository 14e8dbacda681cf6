use std::path::PathBuf;

use thiserror::Error;

/// Store failures. `load` recovers from the read-side variants by logging
/// them and returning an empty collection.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no book id left after {max}")]
    IdsExhausted { max: u64 },

    #[error("failed to encode book collection: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
