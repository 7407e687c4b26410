//! PostgreSQL-backed favorites repository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::repository::FavoritesRepository;
use crate::error::Result;
use crate::models::{FavoriteMovie, NewFavoriteMovie};

/// Production repository over a shared connection pool. Single-statement
/// mutations lean on PostgreSQL's per-statement atomicity; `rows_affected`
/// carries the compare-and-delete result.
pub struct PgFavoritesRepository {
    pool: PgPool,
}

impl PgFavoritesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FavoritesRepository for PgFavoritesRepository {
    async fn find(&self, user_id: i32, movie_id: i32) -> Result<Option<FavoriteMovie>> {
        let record = sqlx::query_as::<_, FavoriteMovie>(
            r#"
            SELECT id, user_id, movie_id, movie_name, rating, created_at
            FROM favorite_movies
            WHERE user_id = $1 AND movie_id = $2
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self, user_id: i32) -> Result<Vec<FavoriteMovie>> {
        let records = sqlx::query_as::<_, FavoriteMovie>(
            r#"
            SELECT id, user_id, movie_id, movie_name, rating, created_at
            FROM favorite_movies
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn insert(&self, record: NewFavoriteMovie) -> Result<FavoriteMovie> {
        let created = sqlx::query_as::<_, FavoriteMovie>(
            r#"
            INSERT INTO favorite_movies (user_id, movie_id, movie_name, rating, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, movie_id, movie_name, rating, created_at
            "#,
        )
        .bind(record.user_id)
        .bind(record.movie_id)
        .bind(&record.movie_name)
        .bind(record.rating)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn set_rating(&self, user_id: i32, movie_id: i32, rating: f64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE favorite_movies
            SET rating = $3
            WHERE user_id = $1 AND movie_id = $2
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(rating)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: i32, movie_id: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM favorite_movies
            WHERE user_id = $1 AND movie_id = $2
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self, user_id: i32) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM favorite_movies
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
