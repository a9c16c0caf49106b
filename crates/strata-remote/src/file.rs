//! Listing exported to a JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use strata_types::ObjectStats;
use tracing::debug;

use crate::error::{RemoteError, RemoteResult};
use crate::lister::{ObjectLister, ObjectPage};
use crate::memory::MemoryLister;

/// Serves a listing saved as a JSON array of object stats, for example the
/// concatenated `results` of a remote listing.
///
/// The file may be in any order; pages are served sorted.
#[derive(Clone, Debug)]
pub struct JsonFileLister {
    path: PathBuf,
    inner: MemoryLister,
}

impl JsonFileLister {
    pub fn open(path: impl AsRef<Path>) -> RemoteResult<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path).map_err(|source| RemoteError::Io {
            path: path.clone(),
            source,
        })?;
        let records: Vec<ObjectStats> =
            serde_json::from_slice(&bytes).map_err(|source| RemoteError::Malformed {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), objects = records.len(), "loaded listing file");
        Ok(Self {
            path,
            inner: MemoryLister::from_records(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl ObjectLister for JsonFileLister {
    async fn list_page(&self, prefix: &str, after: &str, amount: usize) -> RemoteResult<ObjectPage> {
        self.inner.list_page(prefix, after, amount).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_sorts_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.json");
        std::fs::write(
            &path,
            r#"[{"path":"b","size_bytes":2,"mtime":1},{"path":"a","size_bytes":1,"mtime":1}]"#,
        )
        .unwrap();

        let lister = JsonFileLister::open(&path).unwrap();
        assert_eq!(lister.len(), 2);
        assert_eq!(lister.path(), path.as_path());

        let page = lister.list_page("", "", 10).await.unwrap();
        assert_eq!(page.results[0].path, "a");
        assert_eq!(page.results[1].path, "b");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileLister::open(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, RemoteError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonFileLister::open(&path).unwrap_err(),
            RemoteError::Malformed { .. }
        ));
    }
}
