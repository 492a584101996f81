//! One collector run: retrieve all pages, persist the accumulated set.

use tracing::warn;
use xdrvault_core::AppResult;
use xdrvault_domain::{AlertFilter, ApiCredentials};

use crate::delivery_service::{DeliveryOutcome, DeliveryService};
use crate::retrieval_service::RetrievalService;

/// Result of one end-to-end collector run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of alerts accumulated across pages.
    pub alert_count: usize,
    /// Number of non-empty pages retrieved.
    pub pages_fetched: u32,
    /// Object key the set was written under, when anything was persisted.
    pub object_key: Option<String>,
    /// Page failure that ended retrieval early, if any.
    pub page_failure: Option<String>,
}

/// Composes paginated retrieval and storage delivery.
///
/// A page failure mid-run does not fail the pipeline: the partial set is
/// still delivered and the failure is carried in the summary. Storage
/// failures are terminal even when retrieval succeeded.
pub struct CollectorPipeline {
    retrieval: RetrievalService,
    delivery: DeliveryService,
}

impl CollectorPipeline {
    /// Creates a pipeline from its two stages.
    #[must_use]
    pub fn new(retrieval: RetrievalService, delivery: DeliveryService) -> Self {
        Self {
            retrieval,
            delivery,
        }
    }

    /// Executes one run with the given credentials.
    pub async fn run(
        &self,
        credentials: &ApiCredentials,
        extra_filters: &[AlertFilter],
        start: u64,
    ) -> AppResult<RunSummary> {
        let report = self.retrieval.run(credentials, extra_filters, start).await;

        if let Some(error) = report.failure() {
            warn!(
                total = report.alert_count(),
                error = %error,
                "retrieval ended early, delivering partial set"
            );
        }

        let page_failure = report.failure().map(ToString::to_string);
        let pages_fetched = report.pages_fetched();
        let alerts = report.into_alerts();

        let outcome = self.delivery.persist(&alerts).await?;
        let object_key = match outcome {
            DeliveryOutcome::Written { key, .. } => Some(key),
            DeliveryOutcome::NothingToWrite => None,
        };

        Ok(RunSummary {
            alert_count: alerts.len(),
            pages_fetched,
            object_key,
            page_failure,
        })
    }
}

#[cfg(test)]
mod tests;
