//! Catalog client trait and the request/response types it speaks.

use async_trait::async_trait;

/// Raw upstream response: HTTP status plus the unparsed body.
///
/// Parsing is deliberately left to the consumers - the cache and the favorites
/// store each apply their own minimal shape checks.
#[derive(Debug, Clone)]
pub struct CatalogResponse {
    pub status: u16,
    pub body: String,
}

impl CatalogResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure from a single catalog call.
///
/// `Timeout`, `Connection` and `Request` are likely-recoverable and retried;
/// `Unexpected` is terminal.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("The request has timed out.")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("An error occurred with the request: {0}")]
    Request(String),

    #[error("An unexpected error has occurred: {0}")]
    Unexpected(String),
}

/// Query parameters for the popular-movies listing.
#[derive(Debug, Clone)]
pub struct PopularFilters {
    pub include_adult: bool,
    pub include_video: bool,
    pub language: String,
    pub page: u32,
    pub sort_by: String,
}

impl Default for PopularFilters {
    fn default() -> Self {
        Self {
            include_adult: false,
            include_video: false,
            language: "en-US".to_string(),
            page: 1,
            sort_by: "popularity.desc".to_string(),
        }
    }
}

impl PopularFilters {
    /// Render as query pairs in the upstream's expected format.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("include_adult", self.include_adult.to_string()),
            ("include_video", self.include_video.to_string()),
            ("language", self.language.clone()),
            ("page", self.page.to_string()),
            ("sort_by", self.sort_by.clone()),
        ]
    }
}

/// A single synchronous request/response call against the upstream catalog.
///
/// Implementations perform exactly one network call per invocation; retry
/// belongs to [`crate::resilience::RetryingFetcher`].
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch a page of popular movies.
    async fn get_popular_movies(
        &self,
        filters: &PopularFilters,
    ) -> Result<CatalogResponse, TransportError>;

    /// Fetch details for a specific movie.
    async fn get_movie_detail(&self, movie_id: i32) -> Result<CatalogResponse, TransportError>;
}
