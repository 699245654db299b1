//! Persistence seam: the layout document store collaborator.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::layout::Layout;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Backend(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Boxed future for async storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// An opaque document store holding one JSON layout blob per document name.
///
/// The contract is narrow: fetch the active document for a name, and upsert
/// (update the existing row, else insert a new active one). Writes are not
/// atomic against concurrent writers; the builder assumes a single editor.
pub trait LayoutStore: Send + Sync {
    /// Fetch the active layout for `document_name`, if one exists.
    ///
    /// A missing document is `Ok(None)`, not an error; a present but
    /// malformed blob is a `Serialization` error.
    fn load_active(&self, document_name: &str) -> BoxFuture<'_, StoreResult<Option<Layout>>>;

    /// Update the existing row for `document_name`, or insert a new active one.
    fn upsert(&self, document_name: &str, layout: &Layout) -> BoxFuture<'_, StoreResult<()>>;
}
