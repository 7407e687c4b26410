//! Favorite movie records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;

/// FavoriteMovie associates a user with a catalog movie, carrying an optional
/// rating. Maps to the `favorite_movies` table. At most one record per
/// `(user_id, movie_id)` pair is expected by the store's query contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FavoriteMovie {
    pub id: i64,
    pub user_id: i32,
    pub movie_id: i32,
    pub movie_name: String,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// New FavoriteMovie for creation (without the generated key)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFavoriteMovie {
    pub user_id: i32,
    pub movie_id: i32,
    pub movie_name: String,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl FavoriteMovie {
    /// Render as the plain record shape served to dispatchers, with an
    /// ISO-8601 timestamp.
    pub fn to_record(&self) -> Value {
        json!({
            "id": self.id,
            "user_id": self.user_id,
            "movie_id": self.movie_id,
            "movie_name": self.movie_name,
            "rating": self.rating,
            "created_at": self.created_at.to_rfc3339(),
        })
    }
}
