//! Local storage for entry images awaiting upload.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::protocols::PageFetcher;
use crate::errors::Result;
use crate::record::Designation;

/// Downloads entry images into a directory, one file per designation.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Creates a store rooted at `dir`. The directory is created on first
    /// download.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where the image for `designation` is kept.
    #[must_use]
    pub fn path_for(&self, designation: &Designation) -> PathBuf {
        self.dir.join(format!("{designation}.jpg"))
    }

    /// Downloads `reference` and writes it to [`path_for`](Self::path_for).
    pub async fn download(
        &self,
        fetcher: &dyn PageFetcher,
        designation: &Designation,
        reference: &str,
    ) -> Result<PathBuf> {
        let bytes = fetcher.fetch_bytes(reference).await?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(designation);
        tokio::fs::write(&path, &bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "Stored entry image");
        Ok(path)
    }

    /// Removes a downloaded image. A missing file is not an error.
    pub async fn remove(&self, path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => debug!(path = %path.display(), "Removed entry image"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove entry image"),
        }
    }

    /// Removes every file in the storage directory.
    pub async fn clear(&self) -> Result<usize> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                tokio::fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticFetcher;

    #[tokio::test]
    async fn test_download_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("images"));
        let fetcher = StaticFetcher::new().with_bytes("http://img/173.jpg", b"jpeg".to_vec());
        let designation = Designation::parse("173").unwrap();

        let path = store
            .download(&fetcher, &designation, "http://img/173.jpg")
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("images").join("173.jpg"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"jpeg");

        store.remove(&path).await;
        assert!(!path.exists());
        store.remove(&path).await;
    }

    #[tokio::test]
    async fn test_download_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("images"));
        let designation = Designation::parse("173").unwrap();

        let result = store
            .download(&StaticFetcher::new(), &designation, "http://img/missing.jpg")
            .await;
        assert!(result.is_err());
        assert!(!store.path_for(&designation).exists());
    }

    #[tokio::test]
    async fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        tokio::fs::write(dir.path().join("a.jpg"), b"a").await.unwrap();
        tokio::fs::write(dir.path().join("b.jpg"), b"b").await.unwrap();

        assert_eq!(store.clear().await.unwrap(), 2);
        assert_eq!(ImageStore::new(dir.path().join("absent")).clear().await.unwrap(), 0);
    }
}
