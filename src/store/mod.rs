//! # Favorites Store
//!
//! Persistence seam and lifecycle logic for per-user favorite movies. The
//! [`FavoritesRepository`] trait mirrors the underlying record store
//! (find/list/insert/update/delete, each an atomic operation); the
//! [`FavoritesStore`] implements the add/remove/rate/list/clear lifecycle on
//! top of it, including the upstream metadata lookup on insert.

pub mod favorites;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use favorites::{AddOutcome, FavoritesStore, RateOutcome, RemoveOutcome};
pub use memory::MemoryFavoritesRepository;
pub use postgres::PgFavoritesRepository;
pub use repository::FavoritesRepository;
