use std::time::Duration;

use async_trait::async_trait;
use xdrvault_application::AlertPageFetcher;
use xdrvault_core::{AppError, AppResult};
use xdrvault_domain::{AlertEnvelope, AlertQuery, AlertRecord, ApiTarget, AuthHeaders};

/// Connection settings for the alert source.
#[derive(Debug, Clone)]
pub struct HttpAlertSourceConfig {
    /// Bound on one request round trip, connect through body read.
    pub request_timeout: Duration,
    /// Verify the server certificate chain and hostname.
    ///
    /// Off by default because the source is deployed behind self-signed
    /// internal endpoints. Running without verification accepts
    /// man-in-the-middle risk; turn it on wherever the endpoint carries a
    /// trusted certificate.
    pub verify_tls: bool,
}

impl Default for HttpAlertSourceConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            verify_tls: false,
        }
    }
}

/// HTTPS page fetcher for the alerts endpoint.
///
/// One network round trip per call; never retries. The underlying
/// connection is released on every exit path by the response lifecycle.
pub struct HttpAlertSource {
    http_client: reqwest::Client,
}

impl HttpAlertSource {
    /// Creates a fetcher with the given connection settings.
    pub fn new(config: HttpAlertSourceConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build HTTP client: {error}"))
            })?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl AlertPageFetcher for HttpAlertSource {
    async fn fetch_page(
        &self,
        target: &ApiTarget,
        headers: &AuthHeaders,
        query: &AlertQuery,
    ) -> AppResult<Vec<AlertRecord>> {
        let url = target.endpoint_url();
        let mut request = self
            .http_client
            .post(url.as_str())
            .json(&query.to_request());
        for (name, value) in headers.iter() {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(classify_transport_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(AppError::ApiRequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|error| {
            AppError::Transport(format!("failed to read response body: {error}"))
        })?;
        let envelope: AlertEnvelope = serde_json::from_str(body.as_str()).map_err(|error| {
            AppError::MalformedResponse(format!("unexpected alerts response body: {error}"))
        })?;

        Ok(envelope.into_alerts())
    }
}

fn classify_transport_error(error: reqwest::Error) -> AppError {
    if is_tls_error(&error) {
        AppError::Tls(error.to_string())
    } else if error.is_timeout() {
        AppError::Transport(format!("request timed out: {error}"))
    } else {
        AppError::Transport(error.to_string())
    }
}

// reqwest does not expose a TLS error kind; walk the source chain instead.
fn is_tls_error(error: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(error);
    while let Some(inner) = source {
        let text = inner.to_string().to_ascii_lowercase();
        if text.contains("certificate") || text.contains("tls") || text.contains("ssl") {
            return true;
        }
        source = inner.source();
    }

    false
}
