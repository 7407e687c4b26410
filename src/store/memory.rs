//! In-memory favorites repository.
//!
//! Backs the test suite and local development the same way the reference
//! deployment swaps its relational store for an in-memory database under
//! test. Mutations hold the mutex for their full read-then-write span, giving
//! the same atomicity the PostgreSQL repository gets from single statements.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::repository::FavoritesRepository;
use crate::error::Result;
use crate::models::{FavoriteMovie, NewFavoriteMovie};

pub struct MemoryFavoritesRepository {
    rows: Mutex<Vec<FavoriteMovie>>,
    next_id: AtomicI64,
}

impl Default for MemoryFavoritesRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFavoritesRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Total record count across all users.
    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }
}

#[async_trait]
impl FavoritesRepository for MemoryFavoritesRepository {
    async fn find(&self, user_id: i32, movie_id: i32) -> Result<Option<FavoriteMovie>> {
        let rows = self.rows.lock();
        Ok(rows
            .iter()
            .find(|r| r.user_id == user_id && r.movie_id == movie_id)
            .cloned())
    }

    async fn list(&self, user_id: i32) -> Result<Vec<FavoriteMovie>> {
        let rows = self.rows.lock();
        Ok(rows.iter().filter(|r| r.user_id == user_id).cloned().collect())
    }

    async fn insert(&self, record: NewFavoriteMovie) -> Result<FavoriteMovie> {
        let created = FavoriteMovie {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: record.user_id,
            movie_id: record.movie_id,
            movie_name: record.movie_name,
            rating: record.rating,
            created_at: record.created_at,
        };
        self.rows.lock().push(created.clone());
        Ok(created)
    }

    async fn set_rating(&self, user_id: i32, movie_id: i32, rating: f64) -> Result<bool> {
        let mut rows = self.rows.lock();
        match rows
            .iter_mut()
            .find(|r| r.user_id == user_id && r.movie_id == movie_id)
        {
            Some(row) => {
                row.rating = Some(rating);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, user_id: i32, movie_id: i32) -> Result<bool> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|r| !(r.user_id == user_id && r.movie_id == movie_id));
        Ok(rows.len() < before)
    }

    async fn delete_all(&self, user_id: i32) -> Result<u64> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|r| r.user_id != user_id);
        Ok((before - rows.len()) as u64)
    }
}
