//! Persistence of an accumulated alert set to object storage.

use std::sync::Arc;

use tracing::info;
use xdrvault_core::{AppError, AppResult};
use xdrvault_domain::AlertRecord;

use crate::clock::{Clock, SystemClock};
use crate::ports::ObjectStore;

/// Outcome of one persistence attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The alert set was written under the given object key.
    Written {
        /// Object key the set was stored under.
        key: String,
        /// Number of serialized alerts.
        alert_count: usize,
    },
    /// Nothing was written because the accumulator was empty.
    NothingToWrite,
}

/// Serializes one run's alerts and hands them to object storage.
///
/// Object keys carry a second-resolution timestamp. Two writes within the
/// same second collide; accepted for a scheduled collector, where runs are
/// minutes apart.
pub struct DeliveryService {
    store: Arc<dyn ObjectStore>,
    clock: Arc<dyn Clock>,
    bucket: String,
    key_prefix: String,
}

impl DeliveryService {
    /// Default object key prefix.
    pub const DEFAULT_KEY_PREFIX: &'static str = "cortex-alerts";

    /// Creates a delivery service with the system clock and default prefix.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self::with_collaborators(
            store,
            Arc::new(SystemClock),
            bucket,
            Self::DEFAULT_KEY_PREFIX,
        )
    }

    /// Creates a delivery service with explicit collaborators.
    #[must_use]
    pub fn with_collaborators(
        store: Arc<dyn ObjectStore>,
        clock: Arc<dyn Clock>,
        bucket: impl Into<String>,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            clock,
            bucket: bucket.into(),
            key_prefix: key_prefix.into(),
        }
    }

    /// Persists the alert set, or reports that nothing needed writing.
    ///
    /// An empty set performs no storage call. Write failures surface as
    /// `AppError::StorageWriteFailed` and are not retried here.
    pub async fn persist(&self, alerts: &[AlertRecord]) -> AppResult<DeliveryOutcome> {
        if alerts.is_empty() {
            info!("no alerts accumulated, skipping storage write");
            return Ok(DeliveryOutcome::NothingToWrite);
        }

        let key = self.object_key();
        let bytes = serde_json::to_vec_pretty(alerts)
            .map_err(|error| AppError::Internal(format!("failed to serialize alerts: {error}")))?;

        self.store
            .put_object(self.bucket.as_str(), key.as_str(), bytes, "application/json")
            .await?;

        info!(
            bucket = %self.bucket,
            key = %key,
            alert_count = alerts.len(),
            "alerts written to object storage"
        );

        Ok(DeliveryOutcome::Written {
            key,
            alert_count: alerts.len(),
        })
    }

    fn object_key(&self) -> String {
        let stamp = self.clock.now_utc().format("%Y%m%d_%H%M%S");
        format!("{}/{stamp}_alerts.json", self.key_prefix)
    }
}
