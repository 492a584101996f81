//! Credential resolution from the external config store.

use std::sync::Arc;

use xdrvault_core::{AppError, AppResult};
use xdrvault_domain::{ApiCredentials, KeyType};

use crate::ports::ConfigStore;

const KEY_ID_NAME: &str = "cortex/key_id";
const API_KEY_NAME: &str = "cortex/api_key";
const KEY_TYPE_NAME: &str = "cortex/key_type";
const FQDN_NAME: &str = "cortex/fqdn";
const ENDPOINT_NAME: &str = "cortex/endpoint";

/// Resolves the API credential set once at run start.
///
/// Resolution happens before any network call; an unavailable store aborts
/// the run with `AppError::ConfigUnavailable`.
pub struct CredentialLoader {
    store: Arc<dyn ConfigStore>,
}

impl CredentialLoader {
    /// Creates a loader over the given config store.
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Loads and validates the credential set.
    pub async fn load(&self) -> AppResult<ApiCredentials> {
        let key_id_raw = self.store.resolve(KEY_ID_NAME).await?;
        let key_id = key_id_raw.trim().parse::<i64>().map_err(|error| {
            AppError::Validation(format!("invalid key id '{key_id_raw}': {error}"))
        })?;

        let key = self.store.resolve(API_KEY_NAME).await?;
        let key_type = KeyType::parse(self.store.resolve(KEY_TYPE_NAME).await?.as_str())?;
        let host = self.store.resolve(FQDN_NAME).await?;
        let path = self.store.resolve(ENDPOINT_NAME).await?;

        ApiCredentials::new(key_id, key, key_type, host, path)
    }
}
