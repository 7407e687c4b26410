//! Shared test fixtures: a programmable catalog client and config helpers.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use cinelist_core::client::{CatalogClient, CatalogResponse, PopularFilters, TransportError};
use cinelist_core::config::CinelistConfig;

type ScriptedResult = Result<CatalogResponse, TransportError>;

/// Catalog client driven by per-endpoint scripts, counting every call.
#[derive(Default)]
pub struct MockCatalogClient {
    popular_script: Mutex<VecDeque<ScriptedResult>>,
    detail_script: Mutex<VecDeque<ScriptedResult>>,
    popular_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl MockCatalogClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_popular(&self, result: ScriptedResult) {
        self.popular_script.lock().unwrap().push_back(result);
    }

    pub fn script_detail(&self, result: ScriptedResult) {
        self.detail_script.lock().unwrap().push_back(result);
    }

    pub fn popular_calls(&self) -> usize {
        self.popular_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

pub fn ok_response(status: u16, body: &str) -> ScriptedResult {
    Ok(CatalogResponse {
        status,
        body: body.to_string(),
    })
}

#[async_trait]
impl CatalogClient for MockCatalogClient {
    async fn get_popular_movies(
        &self,
        _filters: &PopularFilters,
    ) -> Result<CatalogResponse, TransportError> {
        self.popular_calls.fetch_add(1, Ordering::SeqCst);
        self.popular_script
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock popular script exhausted")
    }

    async fn get_movie_detail(&self, _movie_id: i32) -> Result<CatalogResponse, TransportError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.detail_script
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock detail script exhausted")
    }
}

/// Reference configuration: 30s TTL, 5 attempts, 4s..10s backoff.
pub fn test_config() -> CinelistConfig {
    CinelistConfig::default()
}
