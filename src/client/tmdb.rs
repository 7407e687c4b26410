//! Reqwest-backed catalog client for the TMDB-shaped upstream API.

use async_trait::async_trait;
use tracing::debug;

use super::catalog::{CatalogClient, CatalogResponse, PopularFilters, TransportError};
use crate::config::UpstreamConfig;

/// Production catalog client. Holds no mutable state; a single instance is
/// shared across all concurrent requests.
pub struct TmdbCatalogClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

impl TmdbCatalogClient {
    pub fn new(config: &UpstreamConfig) -> crate::error::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<CatalogResponse, TransportError> {
        let response = request
            .header("accept", "application/json")
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(classify_transport_error)?;

        debug!(status = status, bytes = body.len(), "Catalog response received");
        Ok(CatalogResponse { status, body })
    }
}

#[async_trait]
impl CatalogClient for TmdbCatalogClient {
    async fn get_popular_movies(
        &self,
        filters: &PopularFilters,
    ) -> Result<CatalogResponse, TransportError> {
        let url = format!("{}/discover/movie", self.base_url);
        let request = self.http.get(url).query(&filters.to_query());
        self.execute(request).await
    }

    async fn get_movie_detail(&self, movie_id: i32) -> Result<CatalogResponse, TransportError> {
        let url = format!("{}/movie/{}", self.base_url, movie_id);
        self.execute(self.http.get(url)).await
    }
}

/// Map a reqwest failure into the transient/unexpected taxonomy.
fn classify_transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection(err.to_string())
    } else if err.is_request() || err.is_body() || err.is_decode() {
        TransportError::Request(err.to_string())
    } else {
        TransportError::Unexpected(err.to_string())
    }
}
