use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use xdrvault_core::{AppError, AppResult};
use xdrvault_domain::{AlertQuery, AlertRecord, ApiCredentials, ApiTarget, AuthHeaders, KeyType};

use super::{RetrievalPolicy, RetrievalService};
use crate::ports::AlertPageFetcher;
use crate::signer_service::SignerService;

struct ScriptedFetcher {
    pages: Mutex<VecDeque<AppResult<Vec<AlertRecord>>>>,
    windows: Mutex<Vec<(u64, u64)>>,
}

impl ScriptedFetcher {
    fn new(pages: Vec<AppResult<Vec<AlertRecord>>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            windows: Mutex::new(Vec::new()),
        }
    }

    async fn fetch_count(&self) -> usize {
        self.windows.lock().await.len()
    }
}

#[async_trait]
impl AlertPageFetcher for ScriptedFetcher {
    async fn fetch_page(
        &self,
        _target: &ApiTarget,
        _headers: &AuthHeaders,
        query: &AlertQuery,
    ) -> AppResult<Vec<AlertRecord>> {
        self.windows
            .lock()
            .await
            .push((query.search_from(), query.search_to()));

        self.pages
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

struct EndlessFetcher {
    calls: Mutex<u32>,
}

#[async_trait]
impl AlertPageFetcher for EndlessFetcher {
    async fn fetch_page(
        &self,
        _target: &ApiTarget,
        _headers: &AuthHeaders,
        _query: &AlertQuery,
    ) -> AppResult<Vec<AlertRecord>> {
        let mut calls = self.calls.lock().await;
        *calls += 1;
        Ok(vec![AlertRecord::from(json!({"call": *calls}))])
    }
}

fn credentials() -> ApiCredentials {
    ApiCredentials::new(1, "key", KeyType::Standard, "api.example.test", "/alerts")
        .unwrap_or_else(|_| unreachable!())
}

fn records(ids: &[u64]) -> Vec<AlertRecord> {
    ids.iter()
        .map(|id| AlertRecord::from(json!({"id": id})))
        .collect()
}

fn policy(page_size: u64, max_pages: Option<u32>) -> RetrievalPolicy {
    RetrievalPolicy::new(page_size, max_pages).unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn stops_at_the_first_empty_page() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        Ok(records(&[1, 2])),
        Ok(records(&[3])),
        Ok(Vec::new()),
    ]));
    let service = RetrievalService::new(
        SignerService::new(),
        fetcher.clone(),
        policy(2, Some(10)),
    );

    let report = service.run(&credentials(), &[], 0).await;

    assert_eq!(report.alert_count(), 3);
    assert_eq!(report.pages_fetched(), 2);
    assert!(report.failure().is_none());
    assert_eq!(fetcher.fetch_count().await, 3);
}

#[tokio::test]
async fn windows_advance_without_skipping_or_repeating() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        Ok(records(&[1, 2])),
        Ok(records(&[3, 4])),
        Ok(Vec::new()),
    ]));
    let service = RetrievalService::new(
        SignerService::new(),
        fetcher.clone(),
        policy(2, None),
    );

    service.run(&credentials(), &[], 0).await;

    let windows = fetcher.windows.lock().await.clone();
    assert_eq!(windows, vec![(0, 2), (2, 4), (4, 6)]);
}

#[tokio::test]
async fn page_ceiling_bounds_the_fetch_count() {
    let fetcher = Arc::new(EndlessFetcher {
        calls: Mutex::new(0),
    });
    let service = RetrievalService::new(
        SignerService::new(),
        fetcher.clone(),
        policy(100, Some(3)),
    );

    let report = service.run(&credentials(), &[], 0).await;

    assert_eq!(*fetcher.calls.lock().await, 3);
    assert_eq!(report.alert_count(), 3);
    assert_eq!(report.pages_fetched(), 3);
}

#[tokio::test]
async fn page_failure_keeps_the_partial_accumulator() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        Ok(records(&[1, 2, 3, 4, 5])),
        Err(AppError::Transport("connection reset by peer".to_owned())),
    ]));
    let service = RetrievalService::new(
        SignerService::new(),
        fetcher.clone(),
        policy(5, Some(10)),
    );

    let report = service.run(&credentials(), &[], 0).await;

    assert_eq!(report.alert_count(), 5);
    assert!(report.is_partial());
    assert!(matches!(report.failure(), Some(AppError::Transport(_))));
    assert_eq!(fetcher.fetch_count().await, 2);
}

#[tokio::test]
async fn caller_supplied_start_offsets_the_first_window() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(Vec::new())]));
    let service = RetrievalService::new(
        SignerService::new(),
        fetcher.clone(),
        policy(50, Some(1)),
    );

    service.run(&credentials(), &[], 200).await;

    let windows = fetcher.windows.lock().await.clone();
    assert_eq!(windows, vec![(200, 250)]);
}

#[test]
fn zero_page_ceiling_is_unbounded() {
    assert_eq!(policy(100, Some(0)).max_pages(), None);
    assert_eq!(policy(100, Some(4)).max_pages(), Some(4));
}

#[test]
fn zero_page_size_is_rejected() {
    assert!(RetrievalPolicy::new(0, None).is_err());
}
