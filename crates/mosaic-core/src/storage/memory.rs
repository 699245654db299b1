//! In-memory document store.

use super::{BoxFuture, LayoutStore, StoreError, StoreResult};
use crate::layout::{now_ms, Layout};
use std::sync::RwLock;

/// One stored document row.
#[derive(Debug, Clone)]
struct Row {
    document_name: String,
    is_active: bool,
    blob: String,
    updated_at: u64,
}

/// In-memory store for testing and ephemeral use.
///
/// Mirrors the document-table shape of the real collaborator: rows keyed by
/// document name with an active flag and a JSON blob, updated in place when a
/// row already exists.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Row>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last write time of a row, if it exists.
    pub fn updated_at(&self, document_name: &str) -> Option<u64> {
        self.rows
            .read()
            .ok()?
            .iter()
            .find(|r| r.document_name == document_name)
            .map(|r| r.updated_at)
    }

    /// Insert a raw blob row, bypassing serialization. Test hook for
    /// exercising the malformed-document path.
    pub fn insert_raw(&self, document_name: &str, blob: &str) {
        if let Ok(mut rows) = self.rows.write() {
            rows.push(Row {
                document_name: document_name.to_string(),
                is_active: true,
                blob: blob.to_string(),
                updated_at: now_ms(),
            });
        }
    }
}

impl LayoutStore for MemoryStore {
    fn load_active(&self, document_name: &str) -> BoxFuture<'_, StoreResult<Option<Layout>>> {
        let document_name = document_name.to_string();
        Box::pin(async move {
            let rows = self
                .rows
                .read()
                .map_err(|e| StoreError::Backend(format!("Lock error: {}", e)))?;
            let row = rows
                .iter()
                .find(|r| r.document_name == document_name && r.is_active);
            match row {
                Some(row) => Layout::from_json(&row.blob)
                    .map(Some)
                    .map_err(|e| StoreError::Serialization(e.to_string())),
                None => Ok(None),
            }
        })
    }

    fn upsert(&self, document_name: &str, layout: &Layout) -> BoxFuture<'_, StoreResult<()>> {
        let document_name = document_name.to_string();
        let blob = layout.to_json();
        Box::pin(async move {
            let blob = blob.map_err(|e| StoreError::Serialization(e.to_string()))?;
            let mut rows = self
                .rows
                .write()
                .map_err(|e| StoreError::Backend(format!("Lock error: {}", e)))?;
            match rows.iter_mut().find(|r| r.document_name == document_name) {
                Some(row) => {
                    row.blob = blob;
                    row.is_active = true;
                    row.updated_at = now_ms();
                }
                None => rows.push(Row {
                    document_name,
                    is_active: true,
                    blob,
                    updated_at: now_ms(),
                }),
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        // Simple blocking executor for tests
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }

    #[test]
    fn test_missing_document_is_none() {
        let store = MemoryStore::new();
        let loaded = block_on(store.load_active("nope")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_upsert_then_load() {
        let store = MemoryStore::new();
        let mut layout = Layout::empty();
        layout.name = "Main".to_string();

        block_on(store.upsert("dash", &layout)).unwrap();
        let loaded = block_on(store.load_active("dash")).unwrap().unwrap();
        assert_eq!(loaded.name, "Main");
    }

    #[test]
    fn test_upsert_updates_in_place() {
        let store = MemoryStore::new();
        let mut layout = Layout::empty();

        block_on(store.upsert("dash", &layout)).unwrap();
        layout.name = "Renamed".to_string();
        block_on(store.upsert("dash", &layout)).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.updated_at("dash").is_some());
        let loaded = block_on(store.load_active("dash")).unwrap().unwrap();
        assert_eq!(loaded.name, "Renamed");
    }

    #[test]
    fn test_documents_are_isolated_by_name() {
        let store = MemoryStore::new();
        let layout = Layout::empty();
        block_on(store.upsert("a", &layout)).unwrap();

        assert!(block_on(store.load_active("b")).unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_malformed_blob_is_serialization_error() {
        let store = MemoryStore::new();
        store.insert_raw("dash", "{ this is not a layout }");

        let result = block_on(store.load_active("dash"));
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
