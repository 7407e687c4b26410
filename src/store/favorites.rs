//! Favorites lifecycle logic: add with metadata enrichment, remove, rate,
//! list, clear. Each operation reports a typed outcome that the service layer
//! pattern-matches into the outward response contract.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use super::repository::FavoritesRepository;
use crate::error::Result;
use crate::models::{FavoriteMovie, NewFavoriteMovie};
use crate::resilience::{FetchOutcome, RetryingFetcher, TransientKind};

/// Outcome of an add operation.
#[derive(Debug, Clone)]
pub enum AddOutcome {
    /// Record persisted with upstream-sourced metadata
    Added(FavoriteMovie),

    /// The pair already has a record; idempotent no-op, no upstream call
    AlreadyExists,

    /// Upstream answered with a non-200 status; nothing persisted
    UpstreamRejected { status: u16 },

    /// Retries exhausted on timeouts
    TimedOut,

    /// Retries exhausted on connection failures
    ConnectionFailed,

    /// Retries exhausted on generic transport errors
    RequestFailed { message: String },

    /// Malformed detail body, missing fields, bad date, or a fatal failure
    Unexpected { message: String },
}

/// Outcome of a remove operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Outcome of a rate operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateOutcome {
    Rated,
    NotFound,
}

/// Lifecycle operations over persisted favorites. Holds the repository and
/// the retrying fetcher used for metadata enrichment on insert.
pub struct FavoritesStore {
    repository: Arc<dyn FavoritesRepository>,
    fetcher: Arc<RetryingFetcher>,
}

impl FavoritesStore {
    pub fn new(repository: Arc<dyn FavoritesRepository>, fetcher: Arc<RetryingFetcher>) -> Self {
        Self {
            repository,
            fetcher,
        }
    }

    /// Add a movie to a user's favorites.
    ///
    /// Idempotent: an existing `(user_id, movie_id)` record short-circuits
    /// before any upstream call. Otherwise the movie detail is fetched and a
    /// record is persisted only when the response carries a `title` and a
    /// date-formatted `release_date`. No partial record is ever persisted.
    pub async fn add(&self, user_id: i32, movie_id: i32) -> Result<AddOutcome> {
        if self.repository.find(user_id, movie_id).await?.is_some() {
            return Ok(AddOutcome::AlreadyExists);
        }

        let outcome = match self.fetcher.get_movie_detail(movie_id).await {
            FetchOutcome::Success { status: 200, body } => {
                match parse_movie_detail(&body) {
                    Ok((movie_name, created_at)) => {
                        let created = self
                            .repository
                            .insert(NewFavoriteMovie {
                                user_id,
                                movie_id,
                                movie_name,
                                rating: Some(0.0),
                                created_at,
                            })
                            .await?;
                        info!(
                            user_id = user_id,
                            movie_id = movie_id,
                            movie_name = %created.movie_name,
                            "Movie added to favorites"
                        );
                        AddOutcome::Added(created)
                    }
                    Err(message) => {
                        warn!(movie_id = movie_id, error = %message, "Movie detail rejected");
                        AddOutcome::Unexpected { message }
                    }
                }
            }
            FetchOutcome::Success { status, .. } | FetchOutcome::HttpError { status, .. } => {
                warn!(
                    movie_id = movie_id,
                    status = status,
                    "Movie not added to favorites because status code."
                );
                AddOutcome::UpstreamRejected { status }
            }
            FetchOutcome::Transient { kind, message } => match kind {
                TransientKind::Timeout => AddOutcome::TimedOut,
                TransientKind::Connection => AddOutcome::ConnectionFailed,
                TransientKind::Request => AddOutcome::RequestFailed { message },
            },
            FetchOutcome::Fatal { message } => AddOutcome::Unexpected { message },
        };

        Ok(outcome)
    }

    /// Remove the record for a `(user_id, movie_id)` pair.
    pub async fn remove(&self, user_id: i32, movie_id: i32) -> Result<RemoveOutcome> {
        if self.repository.delete(user_id, movie_id).await? {
            info!(user_id = user_id, movie_id = movie_id, "Movie removed from favorites");
            Ok(RemoveOutcome::Removed)
        } else {
            Ok(RemoveOutcome::NotFound)
        }
    }

    /// Set the rating for an existing record. Range validation belongs to the
    /// caller; the store persists the given value untouched.
    pub async fn rate(&self, user_id: i32, movie_id: i32, rating: f64) -> Result<RateOutcome> {
        if self.repository.set_rating(user_id, movie_id, rating).await? {
            Ok(RateOutcome::Rated)
        } else {
            Ok(RateOutcome::NotFound)
        }
    }

    /// Every favorite for the user, rendered as plain records.
    pub async fn list(&self, user_id: i32) -> Result<Vec<Value>> {
        let records = self.repository.list(user_id).await?;
        Ok(records.iter().map(FavoriteMovie::to_record).collect())
    }

    /// Delete all of the user's favorites, returning the count removed.
    pub async fn clear(&self, user_id: i32) -> Result<u64> {
        let deleted = self.repository.delete_all(user_id).await?;
        info!(user_id = user_id, deleted = deleted, "All FavoriteMovie records have been deleted.");
        Ok(deleted)
    }
}

/// Extract `title` and `release_date` from a movie detail body. The release
/// date becomes the record's `created_at`, matching the upstream contract.
fn parse_movie_detail(body: &str) -> std::result::Result<(String, DateTime<Utc>), String> {
    let document: Value = serde_json::from_str(body)
        .map_err(|e| format!("failed to parse movie detail response: {e}"))?;

    let title = document
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| "movie detail response is missing 'title'".to_string())?;

    let release_date = document
        .get("release_date")
        .and_then(Value::as_str)
        .ok_or_else(|| "movie detail response is missing 'release_date'".to_string())?;

    let date = NaiveDate::parse_from_str(release_date, "%Y-%m-%d")
        .map_err(|e| format!("invalid release_date '{release_date}': {e}"))?;

    Ok((title.to_string(), date.and_time(NaiveTime::MIN).and_utc()))
}
