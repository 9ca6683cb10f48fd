//! Signed, paced, retrying marketplace client.
//!
//! One instance per account: the rate limit is per credential, so pacer
//! state is never shared. Every attempt rebuilds the signed timestamp and
//! signature — the server rejects stale signing dates, including on
//! retries.

use std::time::Duration;

use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use shelfsync_common::{RequestPacer, RetryPolicy};
use shelfsync_domain::constants::{
    EXTENDED_TIMEOUT_HEADER, EXTENDED_TIMEOUT_MS, MIN_REQUEST_INTERVAL,
};
use shelfsync_domain::{MarketplaceConfig, Result, ShelfsyncError};
use tracing::{debug, instrument, warn};

use super::envelope::Envelope;
use super::signer::RequestSigner;
use crate::errors::{from_reqwest, reqwest_is_retryable};

/// Configuration for one signed client.
#[derive(Debug, Clone)]
pub struct MarketplaceClientConfig {
    /// Base URL of the partner API, no trailing slash.
    pub base_url: String,
    /// Scheme token leading the authorization header value.
    pub auth_scheme: String,
    pub request_timeout: Duration,
    /// Timeout applied to known-slow endpoints.
    pub slow_request_timeout: Duration,
    /// Floor between consecutive requests through this client.
    pub min_request_interval: Duration,
}

impl MarketplaceClientConfig {
    pub fn from_marketplace(config: &MarketplaceConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_scheme: config.auth_scheme.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            slow_request_timeout: Duration::from_secs(config.slow_request_timeout_secs),
            min_request_interval: MIN_REQUEST_INTERVAL,
        }
    }
}

/// HTTP client for the partner API with authentication, pacing, and
/// resilience.
pub struct MarketplaceClient {
    http: reqwest::Client,
    config: MarketplaceClientConfig,
    signer: RequestSigner,
    pacer: RequestPacer,
    retry: RetryPolicy,
}

impl MarketplaceClient {
    /// Build a client for one account's credentials.
    pub fn new(
        config: MarketplaceClientConfig,
        access_key: &str,
        secret_key: &str,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ShelfsyncError::Config(format!("failed to build HTTP client: {e}")))?;

        let signer = RequestSigner::new(config.auth_scheme.clone(), access_key, secret_key);
        let pacer = RequestPacer::new(config.min_request_interval);

        Ok(Self { http, config, signer, pacer, retry })
    }

    /// GET with the default timeout.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.execute(path, query, self.config.request_timeout).await
    }

    /// GET with the extended timeout for known-slow endpoints.
    pub async fn get_slow(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.execute(path, query, self.config.slow_request_timeout).await
    }

    /// Perform one logical call: pace, sign, send, classify, retry.
    ///
    /// Outcomes:
    /// - 200 with a body-level success marker: the parsed payload.
    /// - 200 with a body-level error marker: raised immediately, never
    ///   retried — a semantic rejection, not a transient fault.
    /// - Retryable status ({429, 500, 502, 503, 504}) or a network-level
    ///   failure: retried with backoff until attempts are exhausted, then
    ///   the final error is raised.
    /// - Any other status: raised immediately, surfacing the server's own
    ///   code/message when the body carries one.
    #[instrument(skip(self, query), fields(path = %path))]
    async fn execute(&self, path: &str, query: &[(&str, String)], timeout: Duration) -> Result<Value> {
        let canonical = canonical_query(query);
        let url = if canonical.is_empty() {
            format!("{}{}", self.config.base_url, path)
        } else {
            format!("{}{}?{}", self.config.base_url, path, canonical)
        };

        let max_attempts = self.retry.max_attempts();
        let mut last_error = ShelfsyncError::Internal("request was never attempted".into());

        for attempt in 1..=max_attempts {
            self.pacer.pace().await;

            // Fresh timestamp and signature on every attempt.
            let signed_date = RequestSigner::signed_date(Utc::now());
            let authorization = self.signer.authorization(&signed_date, "GET", path, &canonical);

            debug!(attempt, url = %url, "sending marketplace request");

            let sent = self
                .http
                .get(&url)
                .timeout(timeout)
                .header(AUTHORIZATION, authorization)
                .header(CONTENT_TYPE, "application/json;charset=UTF-8")
                .header(EXTENDED_TIMEOUT_HEADER, EXTENDED_TIMEOUT_MS.to_string())
                .send()
                .await;

            let error = match sent {
                Ok(response) => {
                    let status = response.status();
                    let body = match response.text().await {
                        Ok(body) => body,
                        Err(err) => {
                            // Body read failures are network failures.
                            let retryable = reqwest_is_retryable(&err);
                            last_error = from_reqwest(&err);
                            if retryable && self.retry.should_retry(attempt) {
                                self.backoff(attempt, &last_error).await;
                                continue;
                            }
                            return Err(last_error);
                        }
                    };

                    if status == StatusCode::OK {
                        // Semantic rejections inside a 200 propagate
                        // without a retry.
                        return Envelope::parse(&body).into_result();
                    }

                    status_error(status.as_u16(), &body)
                }
                Err(err) => {
                    if !reqwest_is_retryable(&err) {
                        return Err(from_reqwest(&err));
                    }
                    from_reqwest(&err)
                }
            };

            if error.is_retryable() && self.retry.should_retry(attempt) {
                last_error = error;
                self.backoff(attempt, &last_error).await;
                continue;
            }

            return Err(error);
        }

        Err(last_error)
    }

    async fn backoff(&self, attempt: u32, error: &ShelfsyncError) {
        let delay = self.retry.delay_for(attempt);
        warn!(
            attempt,
            max_attempts = self.retry.max_attempts(),
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "attempt failed, backing off"
        );
        tokio::time::sleep(delay).await;
    }
}

/// Canonical query string in caller-supplied order.
///
/// The string is both signed and sent verbatim, so signature and wire
/// bytes always agree. Never alphabetize: the server verifies against the
/// original order.
fn canonical_query(query: &[(&str, String)]) -> String {
    query
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Typed failure for a non-200 status, surfacing the server's own error
/// code/message when present.
fn status_error(status: u16, body: &str) -> ShelfsyncError {
    let envelope = Envelope::parse(body);
    let message = match (envelope.error_code(), envelope.message()) {
        (Some(code), Some(message)) => format!("[{code}] {message}"),
        (Some(code), None) => format!("[{code}]"),
        _ if body.is_empty() => "no response body".to_string(),
        _ => body.chars().take(500).collect(),
    };

    ShelfsyncError::Http { status, message }
}
