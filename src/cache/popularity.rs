//! Single-slot TTL cache holding the last-known-good popularity document.

use std::future::Future;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde_json::{json, Value};
use tracing::warn;

use crate::resilience::FetchOutcome;

/// Cache slot: the payload and the moment it was accepted.
///
/// `fetched_at` is `None` until the first accepted refresh, so a fresh
/// process always refreshes on its first read.
struct CacheEntry {
    payload: Value,
    fetched_at: Option<Instant>,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        match self.fetched_at {
            Some(at) => at.elapsed() < ttl,
            None => false,
        }
    }
}

/// Shared, process-wide cache for the popular-movies listing.
///
/// The read path takes a read lock only. The refresh path performs the fetch
/// outside any lock, then swaps payload and timestamp together under the
/// write lock; the slot is never partially updated. Concurrent refreshers may
/// redundantly call upstream, but the commit re-checks freshness so at most
/// one result lands per TTL window.
pub struct PopularityCache {
    entry: RwLock<CacheEntry>,
}

impl Default for PopularityCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PopularityCache {
    pub fn new() -> Self {
        Self {
            entry: RwLock::new(CacheEntry {
                payload: Self::empty_placeholder(),
                fetched_at: None,
            }),
        }
    }

    /// The document served before any successful refresh.
    pub fn empty_placeholder() -> Value {
        json!({
            "page": 0,
            "results": [],
            "total_pages": 0,
            "total_results": 0
        })
    }

    /// Current payload regardless of freshness.
    pub fn snapshot(&self) -> Value {
        self.entry.read().payload.clone()
    }

    /// Serve the cached payload if fresh, otherwise run `refresh` and commit
    /// its result when acceptable. Always returns a document; refresh
    /// failures are logged and the previous payload (possibly the empty
    /// placeholder) is served unchanged.
    pub async fn read_or_refresh<F, Fut>(&self, ttl: Duration, refresh: F) -> Value
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchOutcome>,
    {
        {
            let entry = self.entry.read();
            if entry.is_fresh(ttl) {
                return entry.payload.clone();
            }
        }

        match Self::accept(refresh().await) {
            Some(document) => self.commit(document, ttl),
            None => self.snapshot(),
        }
    }

    /// Acceptance check: status 200 and a JSON object carrying a `results`
    /// key. Anything else abandons the refresh.
    fn accept(outcome: FetchOutcome) -> Option<Value> {
        match outcome {
            FetchOutcome::Success { status: 200, body } => {
                match serde_json::from_str::<Value>(&body) {
                    Ok(document) => {
                        if document.is_object() && document.get("results").is_some() {
                            Some(document)
                        } else {
                            warn!("Popularity refresh abandoned: response structure is invalid");
                            None
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "Popularity refresh abandoned: failed to parse JSON response");
                        None
                    }
                }
            }
            FetchOutcome::Success { status, .. } => {
                warn!(status = status, "Popularity refresh abandoned: unexpected success status");
                None
            }
            FetchOutcome::HttpError { status, body } => {
                warn!(status = status, body = %body, "Popularity refresh abandoned: upstream error status");
                None
            }
            FetchOutcome::Transient { kind, message } => {
                warn!(kind = %kind, error = %message, "Popularity refresh abandoned: transient failure persisted");
                None
            }
            FetchOutcome::Fatal { message } => {
                warn!(error = %message, "Popularity refresh abandoned: unexpected failure");
                None
            }
        }
    }

    /// Swap payload and timestamp atomically. If another refresher committed
    /// while this one was fetching, keep the already-fresh slot instead.
    fn commit(&self, document: Value, ttl: Duration) -> Value {
        let mut entry = self.entry.write();
        if entry.is_fresh(ttl) {
            return entry.payload.clone();
        }
        entry.payload = document.clone();
        entry.fetched_at = Some(Instant::now());
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::TransientKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn success(body: &str) -> FetchOutcome {
        FetchOutcome::Success {
            status: 200,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_starts_with_empty_placeholder() {
        let cache = PopularityCache::new();
        let snapshot = cache.snapshot();
        assert_eq!(snapshot["page"], 0);
        assert_eq!(snapshot["results"], json!([]));
        assert_eq!(snapshot["total_results"], 0);
    }

    #[test]
    fn test_fresh_read_skips_refresh() {
        let cache = PopularityCache::new();
        let ttl = Duration::from_secs(30);
        let calls = AtomicUsize::new(0);

        let first = tokio_test::block_on(cache.read_or_refresh(ttl, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { success(r#"{"results":[{"id":1,"title":"Movie 1"}]}"#) }
        }));
        assert_eq!(first["results"][0]["title"], "Movie 1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Within the TTL: identical document, zero upstream calls.
        let second = tokio_test::block_on(cache.read_or_refresh(ttl, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { success(r#"{"results":[]}"#) }
        }));
        assert_eq!(second, first);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_non_200_leaves_cache_unchanged() {
        let cache = PopularityCache::new();
        let before = cache.snapshot();

        let served = tokio_test::block_on(cache.read_or_refresh(Duration::ZERO, || async {
            FetchOutcome::HttpError {
                status: 503,
                body: "unavailable".to_string(),
            }
        }));
        assert_eq!(served, before);
        assert_eq!(cache.snapshot(), before);
    }

    #[test]
    fn test_malformed_body_leaves_cache_unchanged() {
        let cache = PopularityCache::new();
        let ttl = Duration::from_secs(30);

        let seeded = tokio_test::block_on(
            cache.read_or_refresh(ttl, || async { success(r#"{"results":[1,2]}"#) }),
        );

        // Unparseable body.
        let served = tokio_test::block_on(
            cache.read_or_refresh(Duration::ZERO, || async { success("{not json") }),
        );
        assert_eq!(served, seeded);

        // Parseable but missing the results key.
        let served = tokio_test::block_on(
            cache.read_or_refresh(Duration::ZERO, || async { success(r#"{"page":1}"#) }),
        );
        assert_eq!(served, seeded);

        // Parseable but not a mapping.
        let served = tokio_test::block_on(
            cache.read_or_refresh(Duration::ZERO, || async { success(r#"[1,2,3]"#) }),
        );
        assert_eq!(served, seeded);
    }

    #[test]
    fn test_transient_exhaustion_serves_placeholder() {
        let cache = PopularityCache::new();

        let served = tokio_test::block_on(cache.read_or_refresh(Duration::ZERO, || async {
            FetchOutcome::Transient {
                kind: TransientKind::Timeout,
                message: "The request has timed out.".to_string(),
            }
        }));
        assert_eq!(served, PopularityCache::empty_placeholder());
    }

    #[test]
    fn test_expired_entry_is_replaced_wholesale() {
        let cache = PopularityCache::new();

        let first = tokio_test::block_on(
            cache.read_or_refresh(Duration::ZERO, || async { success(r#"{"results":["a"]}"#) }),
        );
        assert_eq!(first["results"][0], "a");

        // TTL of zero expires immediately; next read refreshes again.
        let second = tokio_test::block_on(
            cache.read_or_refresh(Duration::ZERO, || async { success(r#"{"results":["b"]}"#) }),
        );
        assert_eq!(second["results"][0], "b");
        assert_eq!(cache.snapshot()["results"][0], "b");
    }
}
