//! Pagination control across alert source pages.

use std::sync::Arc;

use tracing::{info, warn};
use xdrvault_core::{AppError, AppResult};
use xdrvault_domain::{
    AlertFilter, AlertQuery, AlertRecord, ApiCredentials, ApiTarget, PageWindow, RetrievalReport,
};

use crate::ports::AlertPageFetcher;
use crate::signer_service::SignerService;

/// Bounds for one retrieval run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalPolicy {
    page_size: u64,
    max_pages: Option<u32>,
}

impl RetrievalPolicy {
    /// Default number of alerts requested per page.
    pub const DEFAULT_PAGE_SIZE: u64 = 100;

    /// Default page ceiling.
    pub const DEFAULT_MAX_PAGES: u32 = 10;

    /// Creates a validated policy.
    ///
    /// A `max_pages` of zero is normalized to unbounded, matching the
    /// source API contract. Callers running unbounded accept that
    /// termination then relies on the source eventually returning an empty
    /// page.
    pub fn new(page_size: u64, max_pages: Option<u32>) -> AppResult<Self> {
        if page_size == 0 {
            return Err(AppError::Validation(
                "page size must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            page_size,
            max_pages: max_pages.filter(|pages| *pages > 0),
        })
    }

    /// Returns the page size.
    #[must_use]
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Returns the page ceiling, `None` meaning unbounded.
    #[must_use]
    pub fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }
}

impl Default for RetrievalPolicy {
    fn default() -> Self {
        Self {
            page_size: Self::DEFAULT_PAGE_SIZE,
            max_pages: Some(Self::DEFAULT_MAX_PAGES),
        }
    }
}

/// Drives the page fetcher across successive offset windows.
///
/// One fetch is in flight at a time: the remote cursor is offset-based, so
/// out-of-order requests would corrupt accumulation order. Offsets never
/// skip or repeat.
pub struct RetrievalService {
    signer: SignerService,
    fetcher: Arc<dyn AlertPageFetcher>,
    policy: RetrievalPolicy,
}

impl RetrievalService {
    /// Creates a retrieval service.
    #[must_use]
    pub fn new(
        signer: SignerService,
        fetcher: Arc<dyn AlertPageFetcher>,
        policy: RetrievalPolicy,
    ) -> Self {
        Self {
            signer,
            fetcher,
            policy,
        }
    }

    /// Retrieves pages from `start` until a stop condition fires.
    ///
    /// Stop conditions: an empty page (end of data), the configured page
    /// ceiling, or a page failure. A failed page ends the run without
    /// retries and keeps everything accumulated so far; the partial report
    /// is still handed downstream.
    pub async fn run(
        &self,
        credentials: &ApiCredentials,
        extra_filters: &[AlertFilter],
        start: u64,
    ) -> RetrievalReport {
        let target = credentials.target();
        let mut report = RetrievalReport::new();
        let mut offset = start;
        let mut page: u32 = 1;

        loop {
            let fetched = self
                .fetch_one(credentials, &target, extra_filters, offset)
                .await;

            let alerts = match fetched {
                Ok(alerts) => alerts,
                Err(error) => {
                    warn!(
                        page = page,
                        total = report.alert_count(),
                        error = %error,
                        "page fetch failed, stopping with partial results"
                    );
                    report.record_failure(error);
                    break;
                }
            };

            if alerts.is_empty() {
                info!(
                    page = page,
                    total = report.alert_count(),
                    "alert source exhausted"
                );
                break;
            }

            let retrieved = alerts.len();
            report.fold_page(alerts);
            info!(
                page = page,
                retrieved = retrieved,
                total = report.alert_count(),
                "retrieved alert page"
            );

            page = page.saturating_add(1);
            offset = offset.saturating_add(self.policy.page_size());

            if let Some(max_pages) = self.policy.max_pages() {
                if page > max_pages {
                    info!(max_pages = max_pages, "reached configured page ceiling");
                    break;
                }
            }
        }

        report
    }

    async fn fetch_one(
        &self,
        credentials: &ApiCredentials,
        target: &ApiTarget,
        extra_filters: &[AlertFilter],
        offset: u64,
    ) -> AppResult<Vec<AlertRecord>> {
        let window = PageWindow::with_size(offset, self.policy.page_size())?;
        let headers = self.signer.sign(credentials)?;
        let query = AlertQuery::for_window(window, extra_filters);

        self.fetcher.fetch_page(target, &headers, &query).await
    }
}

#[cfg(test)]
mod tests;
