use async_trait::async_trait;
use xdrvault_core::AppResult;

/// Opaque "put object" capability of the storage collaborator.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes one object under the given bucket and key.
    ///
    /// Adapters surface failures as `AppError::StorageWriteFailed` and do
    /// not retry.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()>;
}
