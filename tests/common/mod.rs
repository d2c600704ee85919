#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use kv_shortener::application::services::ShortenerSettings;
use kv_shortener::domain::repositories::{KvStore, StoreError};
use kv_shortener::infrastructure::store::MemoryStore;
use kv_shortener::routes::api_router;
use kv_shortener::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

pub const BASE_URL: &str = "http://base";

pub fn test_settings() -> ShortenerSettings {
    ShortenerSettings {
        base_url: BASE_URL.to_string(),
        id_length: 6,
        max_attempts: 10,
        store_timeout: Duration::from_secs(1),
    }
}

pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), &test_settings());
    (state, store)
}

pub fn create_test_server() -> (TestServer, Arc<MemoryStore>) {
    let (state, store) = create_test_state();
    let server = TestServer::new(api_router(state)).unwrap();
    (server, store)
}

pub fn create_server_with_store(store: Arc<dyn KvStore>) -> TestServer {
    let state = AppState::new(store, &test_settings());
    TestServer::new(api_router(state)).unwrap()
}

/// Identifier part of a short URL produced under [`BASE_URL`].
pub fn id_of(short_url: &str) -> &str {
    short_url
        .strip_prefix(BASE_URL)
        .and_then(|rest| rest.strip_prefix('/'))
        .expect("short URL should start with the base URL")
}

/// A store whose backend is unreachable.
pub struct UnreachableStore;

#[async_trait]
impl KvStore for UnreachableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Connection("connection refused".into()))
    }

    async fn exists(&self, _key: &str) -> Result<bool, StoreError> {
        Err(StoreError::Connection("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Connection("connection refused".into()))
    }

    async fn insert_if_absent(&self, _key: &str, _value: &str) -> Result<bool, StoreError> {
        Err(StoreError::Connection("connection refused".into()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Connection("connection refused".into()))
    }
}

/// A store that reports every key as taken and records nothing.
pub struct SaturatedStore {
    pub checks: AtomicU32,
}

impl SaturatedStore {
    pub fn new() -> Self {
        Self {
            checks: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl KvStore for SaturatedStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(Some("https://taken.example".to_string()))
    }

    async fn exists(&self, _key: &str) -> Result<bool, StoreError> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_if_absent(&self, _key: &str, _value: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
