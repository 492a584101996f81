use async_trait::async_trait;
use xdrvault_application::ConfigStore;
use xdrvault_core::{AppError, AppResult};

/// Config store resolving names against process environment variables.
///
/// A name like `cortex/key_id` maps to `CORTEX_KEY_ID`: separator
/// characters become underscores and the result is uppercased.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfigStore;

impl EnvConfigStore {
    /// Creates an environment-backed config store.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn env_key(name: &str) -> String {
        name.trim_matches('/')
            .chars()
            .map(|character| {
                if character.is_ascii_alphanumeric() {
                    character.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

#[async_trait]
impl ConfigStore for EnvConfigStore {
    async fn resolve(&self, name: &str) -> AppResult<String> {
        let key = Self::env_key(name);
        std::env::var(&key).map_err(|_| {
            AppError::ConfigUnavailable(format!(
                "environment variable '{key}' is not set (config name '{name}')"
            ))
        })
    }
}
