use std::collections::HashMap;

use async_trait::async_trait;
use xdrvault_application::ConfigStore;
use xdrvault_core::{AppError, AppResult};

/// Map-backed config store for tests and local wiring.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    values: HashMap<String, String>,
}

impl InMemoryConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one value, builder-style.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn resolve(&self, name: &str) -> AppResult<String> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::ConfigUnavailable(format!("config name '{name}' is absent")))
    }
}
