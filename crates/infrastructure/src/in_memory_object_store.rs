use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use xdrvault_application::ObjectStore;
use xdrvault_core::AppResult;

/// Stored object content and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object bytes as written.
    pub bytes: Vec<u8>,
    /// Content type supplied at write time.
    pub content_type: String,
}

/// Map-backed object store.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<(String, String), StoredObject>>,
}

impl InMemoryObjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns one stored object by bucket and key.
    pub async fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .await
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
    }

    /// Lists the stored keys of a bucket in insertion-independent order.
    pub async fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .read()
            .await
            .keys()
            .filter_map(|(stored_bucket, key)| {
                (stored_bucket == bucket).then(|| key.clone())
            })
            .collect()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()> {
        self.objects.write().await.insert(
            (bucket.to_owned(), key.to_owned()),
            StoredObject {
                bytes,
                content_type: content_type.to_owned(),
            },
        );

        Ok(())
    }
}
