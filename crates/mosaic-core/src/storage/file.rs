//! File-based document store.

use super::{BoxFuture, LayoutStore, StoreError, StoreResult};
use crate::layout::Layout;
use std::fs;
use std::path::PathBuf;

/// Stores one JSON file per document name in a base directory.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a new file store with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StoreResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StoreError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create a file store in the default location.
    ///
    /// On Unix: `~/.local/share/mosaic/layouts/`
    /// On Windows: `%APPDATA%\mosaic\layouts\`
    pub fn default_location() -> StoreResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StoreError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("mosaic").join("layouts"))
    }

    /// File path for a document name, sanitized for the filesystem.
    fn document_path(&self, document_name: &str) -> PathBuf {
        let safe_name: String = document_name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", safe_name))
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl LayoutStore for FileStore {
    fn load_active(&self, document_name: &str) -> BoxFuture<'_, StoreResult<Option<Layout>>> {
        let path = self.document_path(document_name);
        Box::pin(async move {
            if !path.exists() {
                return Ok(None);
            }

            let json = fs::read_to_string(&path)
                .map_err(|e| StoreError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

            Layout::from_json(&json).map(Some).map_err(|e| {
                StoreError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })
        })
    }

    fn upsert(&self, document_name: &str, layout: &Layout) -> BoxFuture<'_, StoreResult<()>> {
        let path = self.document_path(document_name);
        let json = layout.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StoreError::Serialization(e.to_string()))?;
            fs::write(&path, json)
                .map_err(|e| StoreError::Io(format!("Failed to write {}: {}", path.display(), e)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
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
    fn test_file_store_upsert_load() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        let mut layout = Layout::empty();
        layout.name = "Test Dashboard".to_string();

        block_on(store.upsert("test-doc", &layout)).unwrap();
        let loaded = block_on(store.load_active("test-doc")).unwrap().unwrap();

        assert_eq!(loaded.name, "Test Dashboard");
    }

    #[test]
    fn test_file_store_missing_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        let loaded = block_on(store.load_active("nonexistent")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_file_store_overwrites() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        let mut layout = Layout::empty();
        block_on(store.upsert("doc", &layout)).unwrap();
        layout.name = "Second".to_string();
        block_on(store.upsert("doc", &layout)).unwrap();

        let loaded = block_on(store.load_active("doc")).unwrap().unwrap();
        assert_eq!(loaded.name, "Second");
    }

    #[test]
    fn test_file_store_sanitizes_name() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        let layout = Layout::empty();
        block_on(store.upsert("weird/name:with*chars", &layout)).unwrap();

        let loaded = block_on(store.load_active("weird/name:with*chars")).unwrap();
        assert!(loaded.is_some());
    }

    #[test]
    fn test_file_store_corrupt_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        fs::write(dir.path().join("doc.json"), "garbage").unwrap();
        let result = block_on(store.load_active("doc"));
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
