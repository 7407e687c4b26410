//! Aggregator service: composes cache, fetcher and store behind the uniform
//! request/response contract consumed by the dispatcher.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::error;

use super::response::{ApiResponse, ResponseStatus};
use crate::cache::PopularityCache;
use crate::client::{CatalogClient, PopularFilters};
use crate::config::CinelistConfig;
use crate::resilience::RetryingFetcher;
use crate::store::{AddOutcome, FavoritesRepository, FavoritesStore, RateOutcome, RemoveOutcome};

/// Explicitly constructed service instance holding its collaborators; no
/// global state. One instance serves all concurrent requests.
pub struct AggregatorService {
    cache: PopularityCache,
    fetcher: Arc<RetryingFetcher>,
    store: FavoritesStore,
    ttl: Duration,
}

impl AggregatorService {
    pub fn new(
        client: Arc<dyn CatalogClient>,
        repository: Arc<dyn FavoritesRepository>,
        config: &CinelistConfig,
    ) -> Self {
        let fetcher = Arc::new(RetryingFetcher::new(client, config.retry.policy()));
        let store = FavoritesStore::new(repository, fetcher.clone());

        Self {
            cache: PopularityCache::new(),
            fetcher,
            store,
            ttl: config.cache.ttl(),
        }
    }

    /// Popular movies, served from cache within the TTL. Never fails outward:
    /// refresh failures degrade to the last-known-good (or empty) document.
    pub async fn get_popular(&self, filters: &PopularFilters) -> ApiResponse {
        let document = self
            .cache
            .read_or_refresh(self.ttl, || self.fetcher.get_popular_movies(filters))
            .await;
        ApiResponse::document(document)
    }

    /// Add a movie to the user's favorites, enriching it with upstream
    /// metadata. Idempotent on repeat calls.
    pub async fn add_favorite(&self, user_id: i32, movie_id: i32) -> ApiResponse {
        match self.store.add(user_id, movie_id).await {
            Ok(AddOutcome::Added(_)) => ApiResponse::message("Movie added successfully."),
            Ok(AddOutcome::AlreadyExists) => {
                ApiResponse::message("Movie already exists in favorites")
            }
            Ok(AddOutcome::UpstreamRejected { .. }) => ApiResponse::failure_message(
                ResponseStatus::BadRequest,
                "Movie not added to favorites because status code.",
            ),
            Ok(AddOutcome::TimedOut) => ApiResponse::failure_message(
                ResponseStatus::RequestTimeout,
                "The request to the external api has timed out.",
            ),
            Ok(AddOutcome::ConnectionFailed) => {
                ApiResponse::failure_message(ResponseStatus::NotFound, "Connection error.")
            }
            Ok(AddOutcome::RequestFailed { message }) => {
                ApiResponse::failure_message(ResponseStatus::BadRequest, message)
            }
            Ok(AddOutcome::Unexpected { message }) => ApiResponse::failure_message(
                ResponseStatus::InternalError,
                format!("An unexpected error has occurred: {message}"),
            ),
            Err(e) => {
                error!(user_id = user_id, movie_id = movie_id, error = %e, "Add favorite failed");
                ApiResponse::failure_message(
                    ResponseStatus::InternalError,
                    format!("An unexpected error has occurred: {e}"),
                )
            }
        }
    }

    /// Remove a movie from the user's favorites.
    pub async fn remove_favorite(&self, user_id: i32, movie_id: i32) -> ApiResponse {
        match self.store.remove(user_id, movie_id).await {
            Ok(RemoveOutcome::Removed) => ApiResponse::message("Movie removed from favorites"),
            Ok(RemoveOutcome::NotFound) => ApiResponse::error(
                ResponseStatus::NotFound,
                "Favorite movie not found for this user",
            ),
            Err(e) => {
                error!(user_id = user_id, movie_id = movie_id, error = %e, "Remove favorite failed");
                ApiResponse::error(
                    ResponseStatus::InternalError,
                    format!("An unexpected error has occurred: {e}"),
                )
            }
        }
    }

    /// Update the rating on an existing favorite. Bounds are enforced here,
    /// before the store is reached; 0 and 5 are accepted.
    pub async fn rate_favorite(&self, user_id: i32, movie_id: i32, rating: f64) -> ApiResponse {
        if !(0.0..=5.0).contains(&rating) {
            return ApiResponse::error(
                ResponseStatus::BadRequest,
                "Rating must be between 0 and 5",
            );
        }

        match self.store.rate(user_id, movie_id, rating).await {
            Ok(RateOutcome::Rated) => ApiResponse::message("Movie rating updated successfully."),
            Ok(RateOutcome::NotFound) => ApiResponse::error(
                ResponseStatus::NotFound,
                "Favorite movie not found for this user",
            ),
            Err(e) => {
                error!(user_id = user_id, movie_id = movie_id, error = %e, "Rate favorite failed");
                ApiResponse::error(
                    ResponseStatus::InternalError,
                    format!("An unexpected error has occurred: {e}"),
                )
            }
        }
    }

    /// The user's favorites as plain records with ISO-8601 timestamps.
    pub async fn list_favorites(&self, user_id: i32) -> ApiResponse {
        match self.store.list(user_id).await {
            Ok(records) => ApiResponse::favorites(records),
            Err(e) => {
                error!(user_id = user_id, error = %e, "List favorites failed");
                ApiResponse::error(
                    ResponseStatus::InternalError,
                    format!("An unexpected error has occurred: {e}"),
                )
            }
        }
    }

    /// Delete all of the user's favorites.
    pub async fn clear_favorites(&self, user_id: i32) -> ApiResponse {
        match self.store.clear(user_id).await {
            Ok(_) => ApiResponse::message("All FavoriteMovie records have been deleted."),
            Err(e) => {
                error!(user_id = user_id, error = %e, "Clear favorites failed");
                ApiResponse::error(
                    ResponseStatus::InternalError,
                    format!("Error deleting FavoriteMovie records: {e}"),
                )
            }
        }
    }

    /// Current cache payload regardless of freshness; diagnostic surface.
    pub fn cached_popularity(&self) -> Value {
        self.cache.snapshot()
    }
}
