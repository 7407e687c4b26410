#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # CineList Core
//!
//! Aggregation core for a movie catalog service: a short-lived cache over an
//! unreliable upstream catalog plus a persisted per-user favorites list.
//!
//! ## Overview
//!
//! The crate fronts a third-party movie catalog (TMDB-shaped HTTP API) and is
//! consumed by a thin dispatcher that maps [`service::ApiResponse`] values onto
//! whatever wire protocol the transport layer speaks. Routing, process
//! bootstrapping, and the persistence engine itself live outside this crate.
//!
//! ## Module Organization
//!
//! - [`client`] - Catalog client trait and the reqwest-backed TMDB implementation
//! - [`resilience`] - Retry policy and the retrying fetcher around catalog calls
//! - [`cache`] - Single-slot TTL cache for the popular-movies document
//! - [`models`] - Favorite movie records
//! - [`store`] - Favorites repository implementations and lifecycle logic
//! - [`service`] - Aggregator service and the dispatcher-facing response contract
//! - [`database`] - PostgreSQL pool management and migrations
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cinelist_core::config::CinelistConfig;
//! use cinelist_core::client::TmdbCatalogClient;
//! use cinelist_core::database::DatabaseConnection;
//! use cinelist_core::store::PgFavoritesRepository;
//! use cinelist_core::service::AggregatorService;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CinelistConfig::default();
//! let client = Arc::new(TmdbCatalogClient::new(&config.upstream)?);
//! let db = DatabaseConnection::new().await?;
//! let repository = Arc::new(PgFavoritesRepository::new(db.pool().clone()));
//! let service = AggregatorService::new(client, repository, &config);
//!
//! let response = service.list_favorites(1).await;
//! println!("favorites: {:?}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod resilience;
pub mod service;
pub mod store;

pub use config::{CacheConfig, CinelistConfig, DatabaseConfig, RetryConfig, UpstreamConfig};
pub use error::{CinelistError, Result};
pub use resilience::{FetchOutcome, RetryPolicy, RetryingFetcher, TransientKind};
pub use service::{AggregatorService, ApiResponse, ResponseStatus};
