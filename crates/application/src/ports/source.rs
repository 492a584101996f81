use async_trait::async_trait;
use xdrvault_core::AppResult;
use xdrvault_domain::{AlertQuery, AlertRecord, ApiTarget, AuthHeaders};

/// One-page fetch against the alert source.
#[async_trait]
pub trait AlertPageFetcher: Send + Sync {
    /// Issues exactly one network round trip for the given window query.
    ///
    /// An absent `reply.alerts` path in the response is an empty page, not
    /// an error. Adapters never retry; retry policy belongs to the caller.
    async fn fetch_page(
        &self,
        target: &ApiTarget,
        headers: &AuthHeaders,
        query: &AlertQuery,
    ) -> AppResult<Vec<AlertRecord>>;
}
