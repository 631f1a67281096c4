use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::records::Record;

pub const DEFAULT_ATTEMPTS: u32 = 3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("company-finder/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    pub attempts: u32,
    /// Upper bound for a single attempt, body included.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("no response within {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },

    #[error("response body is not the expected JSON: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("giving up after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },
}

impl FetchError {
    /// Transport failures, bad statuses and timeouts are worth another try.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Status { .. } | Self::Timeout { .. }
        )
    }
}

/// Runs `op` until it succeeds, bounding each attempt by `policy.timeout`.
///
/// `op` receives the 1-based attempt number. Non-retryable errors are
/// returned as they are; when every attempt fails the last error is wrapped
/// in [`FetchError::Exhausted`].
pub async fn retry_with_timeout<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, FetchError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        debug!(attempt, attempts, "starting attempt");
        let outcome = match tokio::time::timeout(policy.timeout, op(attempt)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                timeout: policy.timeout,
            }),
        };
        match outcome {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) if attempt >= attempts => {
                warn!(attempt, error = %e, "final attempt failed");
                return Err(FetchError::Exhausted {
                    attempts,
                    source: Box::new(e),
                });
            }
            Err(e) => {
                warn!(attempt, error = %e, "attempt failed, retrying");
                attempt += 1;
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(policy: RetryPolicy) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::HttpClientBuild { source: e })?;
        Ok(Self { client, policy })
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub async fn fetch_records(&self, url: &str) -> Result<Vec<Record>, FetchError> {
        let records: Vec<Record> = self.fetch_json(url).await?;
        info!(url, count = records.len(), "fetched records");
        Ok(records)
    }

    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;

        let body = retry_with_timeout(self.policy, |_| self.get_body(parsed.clone())).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode { source: e })
    }

    async fn get_body(&self, url: reqwest::Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport { source: e })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        response
            .text()
            .await
            .map_err(|e| FetchError::Transport { source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            attempts: 3,
            timeout: Duration::from_millis(50),
        }
    }

    #[tokio::test]
    async fn succeeds_on_third_attempt() {
        let calls = AtomicU32::new(0);
        let out = retry_with_timeout(fast_policy(), |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(FetchError::Status { status: 503 })
                } else {
                    Ok("payload")
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(out, "payload");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_all_attempts() {
        let calls = AtomicU32::new(0);
        let err = retry_with_timeout(fast_policy(), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(FetchError::Status { status: 500 }) }
        })
        .await
        .unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match err {
            FetchError::Exhausted { attempts, source } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*source, FetchError::Status { status: 500 }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_attempts_time_out_and_are_retried() {
        let calls = AtomicU32::new(0);
        let out = retry_with_timeout(fast_policy(), |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 1 {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                }
                Ok(attempt)
            }
        })
        .await
        .unwrap();
        assert_eq!(out, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_retryable_errors_stop_immediately() {
        let calls = AtomicU32::new(0);
        let err = retry_with_timeout(fast_policy(), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err::<(), _>(FetchError::InvalidUrl {
                    url: "nope".to_string(),
                })
            }
        })
        .await
        .unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            attempts: 0,
            timeout: Duration::from_millis(50),
        };
        let out = retry_with_timeout(policy, |_| async { Ok(1) }).await.unwrap();
        assert_eq!(out, 1);
    }

    #[tokio::test]
    async fn rejects_unparseable_url_without_network() {
        let fetcher = Fetcher::new(fast_policy()).unwrap();
        let err = fetcher.fetch_records("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn default_policy_is_three_attempts_of_five_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.timeout, Duration::from_secs(5));
    }
}
