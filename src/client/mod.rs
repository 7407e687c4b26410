//! # Catalog Client
//!
//! Trait seam over the upstream movie catalog plus the production
//! reqwest-backed implementation. Transport failures are classified here into
//! the transient/unexpected taxonomy the retry layer acts on; HTTP status
//! handling happens one level up in [`crate::resilience::RetryingFetcher`].

pub mod catalog;
pub mod tmdb;

pub use catalog::{CatalogClient, CatalogResponse, PopularFilters, TransportError};
pub use tmdb::TmdbCatalogClient;
