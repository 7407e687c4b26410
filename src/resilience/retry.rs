//! # Retrying Fetcher
//!
//! Wraps a [`CatalogClient`] with bounded exponential-backoff retry. Only
//! transport-level failures classified as transient are retried; a non-2xx
//! HTTP status means the upstream explicitly rejected the request and is
//! surfaced immediately. When the attempt budget is exhausted the last
//! transient outcome is returned as terminal rather than swallowed.
//!
//! The fetcher holds no mutable state and is safe to invoke concurrently
//! without synchronization.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::client::{CatalogClient, CatalogResponse, PopularFilters, TransportError};

/// Kinds of likely-recoverable failures, kept distinct because the favorites
/// store maps each to its own outward status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransientKind {
    /// The request timed out
    Timeout,
    /// Connection refused or dropped
    Connection,
    /// Generic transport error
    Request,
}

impl std::fmt::Display for TransientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransientKind::Timeout => write!(f, "timeout"),
            TransientKind::Connection => write!(f, "connection"),
            TransientKind::Request => write!(f, "request"),
        }
    }
}

/// Terminal result of a fetch, after retry has run its course.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// 2xx response with its raw body
    Success { status: u16, body: String },

    /// Non-2xx response; not retried, the upstream rejected the request
    HttpError { status: u16, body: String },

    /// Transient failure that survived the whole attempt budget
    Transient { kind: TransientKind, message: String },

    /// Unexpected failure; not retried
    Fatal { message: String },
}

/// Exponential backoff retry policy.
///
/// `wait = max(min_wait, multiplier * 2^(attempt - 1))`, capped at `max_wait`,
/// up to `max_attempts` total attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub min_wait: Duration,
    pub max_wait: Duration,
    pub multiplier: f64,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_wait: Duration::from_secs(4),
            max_wait: Duration::from_secs(10),
            multiplier: 1.0,
            max_attempts: 5,
        }
    }
}

impl RetryPolicy {
    /// Backoff wait after the given 1-based failed attempt.
    pub fn wait_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(32);
        let raw = self.multiplier * 2_f64.powi(exponent as i32);
        let raw = Duration::from_secs_f64(raw.max(0.0));
        raw.clamp(self.min_wait, self.max_wait)
    }
}

/// Retrying wrapper around a catalog client.
pub struct RetryingFetcher {
    client: Arc<dyn CatalogClient>,
    policy: RetryPolicy,
}

impl RetryingFetcher {
    pub fn new(client: Arc<dyn CatalogClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch a page of popular movies with retry.
    pub async fn get_popular_movies(&self, filters: &PopularFilters) -> FetchOutcome {
        self.execute("get_popular_movies", || {
            self.client.get_popular_movies(filters)
        })
        .await
    }

    /// Fetch details for a specific movie with retry.
    pub async fn get_movie_detail(&self, movie_id: i32) -> FetchOutcome {
        self.execute("get_movie_detail", || self.client.get_movie_detail(movie_id))
            .await
    }

    async fn execute<F, Fut>(&self, operation: &str, call: F) -> FetchOutcome
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<CatalogResponse, TransportError>>,
    {
        let mut attempt: u32 = 1;
        loop {
            match call().await {
                Ok(response) if response.is_success() => {
                    debug!(
                        operation = %operation,
                        attempt = attempt,
                        status = response.status,
                        "Upstream call succeeded"
                    );
                    return FetchOutcome::Success {
                        status: response.status,
                        body: response.body,
                    };
                }
                Ok(response) => {
                    // Upstream answered and said no - retrying will not help.
                    warn!(
                        operation = %operation,
                        attempt = attempt,
                        status = response.status,
                        "Upstream rejected the request"
                    );
                    return FetchOutcome::HttpError {
                        status: response.status,
                        body: response.body,
                    };
                }
                Err(err) => {
                    let (kind, message) = match &err {
                        TransportError::Timeout => (TransientKind::Timeout, err.to_string()),
                        TransportError::Connection(_) => {
                            (TransientKind::Connection, err.to_string())
                        }
                        TransportError::Request(_) => (TransientKind::Request, err.to_string()),
                        TransportError::Unexpected(message) => {
                            warn!(
                                operation = %operation,
                                attempt = attempt,
                                error = %message,
                                "Upstream call failed fatally"
                            );
                            return FetchOutcome::Fatal {
                                message: message.clone(),
                            };
                        }
                    };

                    if attempt >= self.policy.max_attempts {
                        warn!(
                            operation = %operation,
                            attempts = attempt,
                            kind = %kind,
                            "Retry budget exhausted"
                        );
                        return FetchOutcome::Transient { kind, message };
                    }

                    let wait = self.policy.wait_for_attempt(attempt);
                    debug!(
                        operation = %operation,
                        attempt = attempt,
                        kind = %kind,
                        wait_ms = wait.as_millis() as u64,
                        "Transient failure, backing off"
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted client: pops one result per call and counts invocations.
    struct ScriptedClient {
        script: Mutex<Vec<Result<CatalogResponse, TransportError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<CatalogResponse, TransportError>>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn next(&self) -> Result<CatalogResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            assert!(!script.is_empty(), "scripted client ran out of responses");
            script.remove(0)
        }
    }

    #[async_trait]
    impl CatalogClient for ScriptedClient {
        async fn get_popular_movies(
            &self,
            _filters: &PopularFilters,
        ) -> Result<CatalogResponse, TransportError> {
            self.next()
        }

        async fn get_movie_detail(
            &self,
            _movie_id: i32,
        ) -> Result<CatalogResponse, TransportError> {
            self.next()
        }
    }

    fn ok(status: u16, body: &str) -> Result<CatalogResponse, TransportError> {
        Ok(CatalogResponse {
            status,
            body: body.to_string(),
        })
    }

    #[test]
    fn test_backoff_schedule_matches_reference_values() {
        let policy = RetryPolicy::default();
        // multiplier * 2^(n-1): 1, 2, 4, 8, 16 -> floored at 4, capped at 10
        assert_eq!(policy.wait_for_attempt(1), Duration::from_secs(4));
        assert_eq!(policy.wait_for_attempt(2), Duration::from_secs(4));
        assert_eq!(policy.wait_for_attempt(3), Duration::from_secs(4));
        assert_eq!(policy.wait_for_attempt(4), Duration::from_secs(8));
        assert_eq!(policy.wait_for_attempt(5), Duration::from_secs(10));
        assert_eq!(policy.wait_for_attempt(12), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_final_attempt_after_transient_failures() {
        let client = Arc::new(ScriptedClient::new(vec![
            Err(TransportError::Timeout),
            Err(TransportError::Connection("refused".to_string())),
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            ok(200, r#"{"results":[]}"#),
        ]));
        let fetcher = RetryingFetcher::new(client.clone(), RetryPolicy::default());

        let outcome = fetcher.get_popular_movies(&PopularFilters::default()).await;
        match outcome {
            FetchOutcome::Success { status, .. } => assert_eq!(status, 200),
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(client.calls(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_surface_last_transient_outcome() {
        let client = Arc::new(ScriptedClient::new(vec![
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            Err(TransportError::Connection("refused".to_string())),
        ]));
        let fetcher = RetryingFetcher::new(client.clone(), RetryPolicy::default());

        let outcome = fetcher.get_movie_detail(42).await;
        match outcome {
            FetchOutcome::Transient { kind, .. } => assert_eq!(kind, TransientKind::Connection),
            other => panic!("expected transient, got {other:?}"),
        }
        assert_eq!(client.calls(), 5);
    }

    #[tokio::test]
    async fn test_http_error_is_not_retried() {
        let client = Arc::new(ScriptedClient::new(vec![ok(500, "upstream broke")]));
        let fetcher = RetryingFetcher::new(client.clone(), RetryPolicy::default());

        let outcome = fetcher.get_movie_detail(42).await;
        match outcome {
            FetchOutcome::HttpError { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream broke");
            }
            other => panic!("expected http error, got {other:?}"),
        }
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_fatal_failure_is_not_retried() {
        let client = Arc::new(ScriptedClient::new(vec![Err(TransportError::Unexpected(
            "tls handshake exploded".to_string(),
        ))]));
        let fetcher = RetryingFetcher::new(client.clone(), RetryPolicy::default());

        let outcome = fetcher.get_movie_detail(42).await;
        assert!(matches!(outcome, FetchOutcome::Fatal { .. }));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_first_attempt_success_makes_one_call() {
        let client = Arc::new(ScriptedClient::new(vec![ok(200, r#"{"results":[]}"#)]));
        let fetcher = RetryingFetcher::new(client.clone(), RetryPolicy::default());

        let outcome = fetcher.get_popular_movies(&PopularFilters::default()).await;
        assert!(matches!(outcome, FetchOutcome::Success { status: 200, .. }));
        assert_eq!(client.calls(), 1);
    }
}
