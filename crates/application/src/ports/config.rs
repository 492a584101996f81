use async_trait::async_trait;
use xdrvault_core::AppResult;

/// Read-only lookup into the external configuration/secrets store.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Resolves one configuration value by name.
    ///
    /// Fails with `AppError::ConfigUnavailable` when the backing store is
    /// unreachable or the name is absent.
    async fn resolve(&self, name: &str) -> AppResult<String>;
}
