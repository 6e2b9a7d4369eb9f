//! HTTP transport wrapper
//!
//! Every remote call in the crate funnels through [`ApiTransport`]: it
//! joins the configured base URL with an endpoint path, carries the
//! session cookie jar, and applies the uniform retry policy. This is
//! the only layer allowed to retry; callers above it either forward or
//! swallow errors, never re-attempt.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{Error, Result};

const LOCAL_API_URL: &str = "http://localhost:3000/api";
const REMOTE_API_URL: &str = "https://api.taskdeck.app/api";

/// Extra attempts allowed after the first failure when retries are on
pub const MAX_RETRIES: u32 = 2;

/// Where the backend lives. A single environment switch, nothing more.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Resolve the base URL from the environment: `TASKDECK_API_URL`
    /// wins outright, otherwise `TASKDECK_API_LOCATION` picks between
    /// the built-in local and remote defaults (local when unset).
    pub fn from_env() -> Self {
        if let Ok(url) = std::env::var("TASKDECK_API_URL") {
            return Self::new(url);
        }
        let location = std::env::var("TASKDECK_API_LOCATION").unwrap_or_default();
        match location.trim().to_ascii_lowercase().as_str() {
            "remote" => Self::new(REMOTE_API_URL),
            _ => Self::new(LOCAL_API_URL),
        }
    }
}

/// Per-attempt verdict of the retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry,
    GiveUp,
}

/// Classify a failed attempt. Auth failures and not-found are
/// non-transient and short-circuit the loop; everything else (5xx,
/// connection errors, timeouts) may be retried.
pub fn retry_decision(error: &Error) -> RetryDecision {
    if error.is_transient() {
        RetryDecision::Retry
    } else {
        RetryDecision::GiveUp
    }
}

/// Run `op` up to `1 + MAX_RETRIES` times when `enabled`, re-asking the
/// policy after each failure. The last error is surfaced when the
/// budget runs out.
pub async fn with_retry<T, F, Fut>(enabled: bool, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let budget = if enabled { MAX_RETRIES } else { 0 };
    let mut failed = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if failed >= budget || retry_decision(&error) == RetryDecision::GiveUp {
                    return Err(error);
                }
                failed += 1;
                warn!(attempt = failed, %error, "request failed, retrying");
            }
        }
    }
}

/// Shared HTTP client with base-URL joining, cookie credentials and
/// the retry loop above.
pub struct ApiTransport {
    client: Client,
    base_url: String,
    unauthorized_reported: AtomicBool,
}

impl ApiTransport {
    pub fn new(config: &ApiConfig) -> Self {
        // Cookie jar carries the session credentials on every request
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            unauthorized_reported: AtomicBool::new(false),
        }
    }

    /// Issue one logical request, retrying per policy when `retry` is
    /// set. `query` and `body` are optional; the response body is
    /// decoded as JSON into `T`.
    pub async fn request<T, B>(
        &self,
        endpoint: &str,
        method: Method,
        query: Option<&[(String, String)]>,
        body: Option<&B>,
        retry: bool,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let result = with_retry(retry, || {
            self.send_once(endpoint, method.clone(), query, body)
        })
        .await;

        if let Err(error) = &result {
            if matches!(error.status(), Some(401) | Some(403)) {
                self.note_unauthorized(error);
            }
        }
        result
    }

    async fn send_once<T, B>(
        &self,
        endpoint: &str,
        method: Method,
        query: Option<&[(String, String)]>,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, %method, "sending request");

        let mut request = self.client.request(method, &url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Log the session-expired condition once per acknowledgement, so
    /// concurrent failing calls do not stack duplicate notifications.
    fn note_unauthorized(&self, error: &Error) {
        if !self.unauthorized_reported.swap(true, Ordering::SeqCst) {
            warn!(%error, "request unauthorized, session may have expired");
        }
    }

    /// Reset the unauthorized notification guard after the condition
    /// has been surfaced to the user.
    pub fn acknowledge_unauthorized(&self) {
        self.unauthorized_reported.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    fn http_error(status: u16) -> Error {
        Error::Http {
            status,
            message: "boom".into(),
        }
    }

    async fn run_scripted(enabled: bool, mut script: Vec<Result<u32>>) -> (Result<u32>, u32) {
        let attempts = AtomicU32::new(0);
        let result = with_retry(enabled, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            let next = if script.is_empty() {
                Ok(0)
            } else {
                script.remove(0)
            };
            async move { next }
        })
        .await;
        let made = attempts.load(Ordering::SeqCst);
        (result, made)
    }

    #[tokio::test]
    async fn test_transient_failure_then_success() {
        let (result, attempts) =
            run_scripted(true, vec![Err(http_error(500)), Ok(7)]).await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts, 2);
    }

    #[tokio::test]
    async fn test_retry_budget_exhausted() {
        let (result, attempts) = run_scripted(
            true,
            vec![
                Err(http_error(500)),
                Err(http_error(502)),
                Err(http_error(503)),
                Ok(7),
            ],
        )
        .await;
        assert_eq!(result.unwrap_err().status(), Some(503));
        assert_eq!(attempts, 1 + MAX_RETRIES);
    }

    #[tokio::test]
    async fn test_retries_disabled_single_attempt() {
        let (result, attempts) =
            run_scripted(false, vec![Err(http_error(500)), Ok(7)]).await;
        assert!(result.is_err());
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn test_auth_errors_never_retried() {
        for status in [401, 403, 404] {
            let (result, attempts) =
                run_scripted(true, vec![Err(http_error(status)), Ok(7)]).await;
            assert_eq!(result.unwrap_err().status(), Some(status));
            assert_eq!(attempts, 1, "status {status} must short-circuit");
        }
    }

    #[test]
    fn test_retry_decision_matches_transience() {
        assert_eq!(retry_decision(&http_error(500)), RetryDecision::Retry);
        assert_eq!(retry_decision(&http_error(404)), RetryDecision::GiveUp);
        assert_eq!(retry_decision(&http_error(401)), RetryDecision::GiveUp);
    }

    #[test]
    fn test_config_strips_trailing_slash() {
        let transport = ApiTransport::new(&ApiConfig::new("http://localhost:3000/api/"));
        assert_eq!(transport.base_url, "http://localhost:3000/api");
    }
}
