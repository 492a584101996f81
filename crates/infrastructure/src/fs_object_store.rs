use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use xdrvault_application::ObjectStore;
use xdrvault_core::{AppError, AppResult};

/// Object store writing `{root}/{bucket}/{key}` on the local filesystem.
///
/// Durable stand-in for a cloud object store; the content type is accepted
/// but not persisted.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Creates a store rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> AppResult<()> {
        let path = self.root.join(bucket).join(key);
        let parent = path.parent().ok_or_else(|| {
            AppError::StorageWriteFailed(format!("object key '{key}' has no parent directory"))
        })?;

        fs::create_dir_all(parent).await.map_err(|error| {
            AppError::StorageWriteFailed(format!(
                "failed to create '{}': {error}",
                parent.display()
            ))
        })?;
        fs::write(&path, bytes).await.map_err(|error| {
            AppError::StorageWriteFailed(format!("failed to write '{}': {error}", path.display()))
        })?;

        debug!(path = %path.display(), "object written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use xdrvault_application::ObjectStore;

    use super::FsObjectStore;

    #[tokio::test]
    async fn writes_objects_under_bucket_and_key() {
        let root = std::env::temp_dir().join(format!("xdrvault-store-{}", Uuid::new_v4()));
        let store = FsObjectStore::new(root.clone());

        let written = store
            .put_object(
                "alerts-bucket",
                "cortex-alerts/20240321_104500_alerts.json",
                b"[{\"id\":1}]".to_vec(),
                "application/json",
            )
            .await;
        assert!(written.is_ok());

        let path = root
            .join("alerts-bucket")
            .join("cortex-alerts/20240321_104500_alerts.json");
        let bytes = tokio::fs::read(&path).await.unwrap_or_default();
        assert_eq!(bytes, b"[{\"id\":1}]".to_vec());

        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
