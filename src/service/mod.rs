//! # Aggregator Service
//!
//! Thin composition layer over the popularity cache, the retrying fetcher and
//! the favorites store. Each method maps one-to-one onto a cache or store
//! operation and translates its typed outcome into the dispatcher-facing
//! [`ApiResponse`] contract; no operation leaves the caller without a
//! well-formed response.

pub mod aggregator;
pub mod response;

pub use aggregator::AggregatorService;
pub use response::{ApiResponse, ResponseBody, ResponseStatus};
