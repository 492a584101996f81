use xdrvault_core::AppError;

use crate::AlertRecord;

/// Accumulated outcome of one retrieval run.
///
/// Alerts are kept in page arrival order; a folded page is never re-fetched
/// or mutated, so the accumulated length only ever grows. A page failure
/// ends the run but keeps everything accumulated up to that point.
#[derive(Debug, Default)]
pub struct RetrievalReport {
    alerts: Vec<AlertRecord>,
    pages_fetched: u32,
    failure: Option<AppError>,
}

impl RetrievalReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one non-empty page into the accumulator.
    pub fn fold_page(&mut self, page: Vec<AlertRecord>) {
        self.alerts.extend(page);
        self.pages_fetched = self.pages_fetched.saturating_add(1);
    }

    /// Records the page failure that ended the run.
    pub fn record_failure(&mut self, error: AppError) {
        self.failure = Some(error);
    }

    /// Returns the accumulated alerts in arrival order.
    #[must_use]
    pub fn alerts(&self) -> &[AlertRecord] {
        self.alerts.as_slice()
    }

    /// Returns the number of accumulated alerts.
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    /// Returns the number of non-empty pages folded into the accumulator.
    #[must_use]
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Returns the failure that ended the run, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&AppError> {
        self.failure.as_ref()
    }

    /// Returns true when the run stopped on a page failure.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.failure.is_some()
    }

    /// Unwraps into the accumulated alerts for the delivery handoff.
    #[must_use]
    pub fn into_alerts(self) -> Vec<AlertRecord> {
        self.alerts
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use xdrvault_core::AppError;

    use super::RetrievalReport;
    use crate::AlertRecord;

    #[test]
    fn folded_pages_concatenate_in_order() {
        let mut report = RetrievalReport::new();
        report.fold_page(vec![AlertRecord::from(json!({"id": 1}))]);
        report.fold_page(vec![
            AlertRecord::from(json!({"id": 2})),
            AlertRecord::from(json!({"id": 3})),
        ]);

        assert_eq!(report.alert_count(), 3);
        assert_eq!(report.pages_fetched(), 2);
        assert_eq!(report.alerts()[2].as_value(), &json!({"id": 3}));
    }

    #[test]
    fn failure_keeps_accumulated_alerts() {
        let mut report = RetrievalReport::new();
        report.fold_page(vec![AlertRecord::from(json!({"id": 1}))]);
        report.record_failure(AppError::Transport("connection reset".to_owned()));

        assert!(report.is_partial());
        assert_eq!(report.alert_count(), 1);
    }
}
