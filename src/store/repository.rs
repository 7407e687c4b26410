//! Repository trait over the persisted favorites collection.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FavoriteMovie, NewFavoriteMovie};

/// Persistence collaborator contract for favorite movies.
///
/// Every mutation is atomic with respect to concurrent callers: `delete` and
/// `set_rating` report whether a row was actually affected, so a concurrent
/// remove cannot double-delete inconsistently.
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Find the record for a `(user_id, movie_id)` pair.
    async fn find(&self, user_id: i32, movie_id: i32) -> Result<Option<FavoriteMovie>>;

    /// All records for a user, in insertion order.
    async fn list(&self, user_id: i32) -> Result<Vec<FavoriteMovie>>;

    /// Persist a new record, returning it with its generated key.
    async fn insert(&self, record: NewFavoriteMovie) -> Result<FavoriteMovie>;

    /// Set the rating for a pair; `false` when no such record exists.
    async fn set_rating(&self, user_id: i32, movie_id: i32, rating: f64) -> Result<bool>;

    /// Compare-and-delete for a pair; `false` when no such record exists.
    async fn delete(&self, user_id: i32, movie_id: i32) -> Result<bool>;

    /// Delete every record for a user in one transaction, returning the count.
    async fn delete_all(&self, user_id: i32) -> Result<u64>;
}
