use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use xdrvault_core::{AppError, AppResult};
use xdrvault_domain::{AlertQuery, AlertRecord, ApiCredentials, ApiTarget, AuthHeaders, KeyType};

use super::CollectorPipeline;
use crate::delivery_service::DeliveryService;
use crate::ports::{AlertPageFetcher, ObjectStore};
use crate::retrieval_service::{RetrievalPolicy, RetrievalService};
use crate::signer_service::SignerService;

struct ScriptedFetcher {
    pages: Mutex<VecDeque<AppResult<Vec<AlertRecord>>>>,
}

#[async_trait]
impl AlertPageFetcher for ScriptedFetcher {
    async fn fetch_page(
        &self,
        _target: &ApiTarget,
        _headers: &AuthHeaders,
        _query: &AlertQuery,
    ) -> AppResult<Vec<AlertRecord>> {
        self.pages
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[derive(Default)]
struct RecordingStore {
    writes: Mutex<Vec<(String, Vec<u8>)>>,
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put_object(
        &self,
        _bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> AppResult<()> {
        self.writes.lock().await.push((key.to_owned(), bytes));
        Ok(())
    }
}

struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn put_object(
        &self,
        _bucket: &str,
        _key: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> AppResult<()> {
        Err(AppError::StorageWriteFailed("bucket gone".to_owned()))
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

fn pipeline(
    pages: Vec<AppResult<Vec<AlertRecord>>>,
    store: Arc<dyn ObjectStore>,
    page_size: u64,
    max_pages: Option<u32>,
) -> CollectorPipeline {
    let fetcher = Arc::new(ScriptedFetcher {
        pages: Mutex::new(pages.into()),
    });
    let policy = RetrievalPolicy::new(page_size, max_pages).unwrap_or_else(|_| unreachable!());
    let retrieval = RetrievalService::new(SignerService::new(), fetcher, policy);
    let delivery = DeliveryService::new(store, "alerts-bucket");

    CollectorPipeline::new(retrieval, delivery)
}

#[tokio::test]
async fn full_run_accumulates_and_writes_one_object() {
    let store = Arc::new(RecordingStore::default());
    let pipeline = pipeline(
        vec![
            Ok(records(&[1, 2])),
            Ok(records(&[3])),
            Ok(Vec::new()),
        ],
        store.clone(),
        2,
        Some(10),
    );

    let summary = pipeline.run(&credentials(), &[], 0).await;

    assert!(summary.is_ok());
    let summary = summary.unwrap_or_else(|_| unreachable!());
    assert_eq!(summary.alert_count, 3);
    assert_eq!(summary.pages_fetched, 2);
    assert!(summary.object_key.is_some());
    assert!(summary.page_failure.is_none());

    let writes = store.writes.lock().await;
    assert_eq!(writes.len(), 1);
    let stored: Vec<AlertRecord> = serde_json::from_slice(&writes[0].1).unwrap_or_default();
    assert_eq!(stored, records(&[1, 2, 3]));
}

#[tokio::test]
async fn partial_run_still_delivers_and_reports_the_failure() {
    let store = Arc::new(RecordingStore::default());
    let pipeline = pipeline(
        vec![
            Ok(records(&[1, 2, 3, 4, 5])),
            Err(AppError::Transport("timed out".to_owned())),
        ],
        store.clone(),
        5,
        Some(10),
    );

    let summary = pipeline.run(&credentials(), &[], 0).await;

    assert!(summary.is_ok());
    let summary = summary.unwrap_or_else(|_| unreachable!());
    assert_eq!(summary.alert_count, 5);
    assert!(summary.page_failure.is_some());
    assert!(summary.object_key.is_some());
    assert_eq!(store.writes.lock().await.len(), 1);
}

#[tokio::test]
async fn empty_run_writes_nothing() {
    let store = Arc::new(RecordingStore::default());
    let pipeline = pipeline(vec![Ok(Vec::new())], store.clone(), 100, Some(10));

    let summary = pipeline.run(&credentials(), &[], 0).await;

    assert!(summary.is_ok());
    let summary = summary.unwrap_or_else(|_| unreachable!());
    assert_eq!(summary.alert_count, 0);
    assert_eq!(summary.object_key, None);
    assert!(store.writes.lock().await.is_empty());
}

#[tokio::test]
async fn storage_failure_is_terminal_even_after_successful_retrieval() {
    let pipeline = pipeline(
        vec![Ok(records(&[1])), Ok(Vec::new())],
        Arc::new(FailingStore),
        100,
        Some(10),
    );

    let result = pipeline.run(&credentials(), &[], 0).await;
    assert!(matches!(result, Err(AppError::StorageWriteFailed(_))));
}
