//! # Resilience Patterns
//!
//! Bounded exponential-backoff retry around upstream catalog calls. The policy
//! lives in a plain value ([`RetryPolicy`]) applied by [`RetryingFetcher`],
//! keeping backoff behavior testable and independent of the call sites.

pub mod retry;

pub use retry::{FetchOutcome, RetryPolicy, RetryingFetcher, TransientKind};
