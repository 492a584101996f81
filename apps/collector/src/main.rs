//! xdrvault alert collector runtime.

#![forbid(unsafe_code)]

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use xdrvault_application::{
    CollectorPipeline, CredentialLoader, DeliveryService, RetrievalPolicy, RetrievalService,
    SignerService,
};
use xdrvault_core::{AppError, AppResult};
use xdrvault_domain::{ApiCredentials, KeyType};
use xdrvault_infrastructure::{
    EnvConfigStore, FsObjectStore, HttpAlertSource, HttpAlertSourceConfig,
};

const USAGE: &str =
    "usage: xdrvault-collector [key_id key key_type host path start page_size max_pages]";

/// Parsed process invocation: credential origin plus pagination bounds.
#[derive(Debug)]
struct Invocation {
    /// Credentials from positional arguments; `None` resolves them from the
    /// config store instead.
    credentials: Option<ApiCredentials>,
    start: u64,
    page_size: u64,
    max_pages: u32,
}

impl Invocation {
    /// Parses positional arguments: either none, or all eight.
    fn parse(args: Vec<String>, default_page_size: u64, default_max_pages: u32) -> AppResult<Self> {
        if args.is_empty() {
            return Ok(Self {
                credentials: None,
                start: 0,
                page_size: default_page_size,
                max_pages: default_max_pages,
            });
        }

        if args.len() != 8 {
            return Err(AppError::Validation(format!(
                "expected 0 or 8 positional arguments, got {}; {USAGE}",
                args.len()
            )));
        }

        let key_id = parse_arg::<i64>("key_id", args[0].as_str())?;
        let key_type = KeyType::parse(args[2].as_str())?;
        let credentials = ApiCredentials::new(
            key_id,
            args[1].as_str(),
            key_type,
            args[3].as_str(),
            args[4].as_str(),
        )?;

        Ok(Self {
            credentials: Some(credentials),
            start: parse_arg::<u64>("start", args[5].as_str())?,
            page_size: parse_arg::<u64>("page_size", args[6].as_str())?,
            max_pages: parse_arg::<u32>("max_pages", args[7].as_str())?,
        })
    }
}

#[derive(Debug, Clone)]
struct CollectorConfig {
    bucket: String,
    storage_root: String,
    verify_tls: bool,
    request_timeout_secs: u64,
}

impl CollectorConfig {
    fn load() -> AppResult<Self> {
        Ok(Self {
            bucket: env::var("ALERTS_BUCKET").unwrap_or_else(|_| "xdr-alerts".to_owned()),
            storage_root: env::var("STORAGE_ROOT").unwrap_or_else(|_| "data".to_owned()),
            verify_tls: parse_env_bool("ALERT_SOURCE_VERIFY_TLS", false)?,
            request_timeout_secs: parse_env_u64("ALERT_SOURCE_TIMEOUT_SECS", 30)?,
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(error = %error, "collector run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AppResult<()> {
    let default_page_size = parse_env_u64("COUNT_PER_PAGE", RetrievalPolicy::DEFAULT_PAGE_SIZE)?;
    let default_max_pages = parse_env_u32("MAX_PAGES", RetrievalPolicy::DEFAULT_MAX_PAGES)?;
    let invocation = Invocation::parse(
        env::args().skip(1).collect(),
        default_page_size,
        default_max_pages,
    )?;
    let config = CollectorConfig::load()?;

    let credentials = match invocation.credentials {
        Some(credentials) => credentials,
        None => {
            CredentialLoader::new(Arc::new(EnvConfigStore::new()))
                .load()
                .await?
        }
    };

    let run_id = Uuid::new_v4();
    info!(
        run_id = %run_id,
        host = %credentials.target().host(),
        key_type = credentials.key_type().as_str(),
        start = invocation.start,
        page_size = invocation.page_size,
        max_pages = invocation.max_pages,
        bucket = %config.bucket,
        "starting alert collection"
    );

    if !config.verify_tls {
        warn!(
            "TLS certificate verification is disabled; set ALERT_SOURCE_VERIFY_TLS=true \
             unless the alert source uses a self-signed certificate"
        );
    }

    let fetcher = Arc::new(HttpAlertSource::new(HttpAlertSourceConfig {
        request_timeout: Duration::from_secs(config.request_timeout_secs),
        verify_tls: config.verify_tls,
    })?);
    let policy = RetrievalPolicy::new(invocation.page_size, Some(invocation.max_pages))?;
    let retrieval = RetrievalService::new(SignerService::new(), fetcher, policy);
    let store = Arc::new(FsObjectStore::new(config.storage_root.clone()));
    let delivery = DeliveryService::new(store, config.bucket.clone());
    let pipeline = CollectorPipeline::new(retrieval, delivery);

    let summary = pipeline.run(&credentials, &[], invocation.start).await?;

    if let Some(failure) = summary.page_failure.as_deref() {
        warn!(
            run_id = %run_id,
            failure = failure,
            "retrieval stopped early; the partial result set was still delivered"
        );
    }

    match summary.object_key.as_deref() {
        Some(key) => info!(
            run_id = %run_id,
            alert_count = summary.alert_count,
            pages_fetched = summary.pages_fetched,
            bucket = %config.bucket,
            key = key,
            "alert collection finished"
        ),
        None => info!(
            run_id = %run_id,
            pages_fetched = summary.pages_fetched,
            "alert collection finished with no alerts to persist"
        ),
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_arg<T: std::str::FromStr>(name: &str, value: &str) -> AppResult<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|error| {
        AppError::Validation(format!("invalid {name} value '{value}': {error}"))
    })
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_u32(name: &str, default: u32) -> AppResult<u32> {
    match env::var(name) {
        Ok(value) => value.parse::<u32>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_bool(name: &str, default: bool) -> AppResult<bool> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            other => Err(AppError::Validation(format!(
                "invalid {name} value '{other}', expected true or false"
            ))),
        },
        Err(_) => Ok(default),
    }
}
