//! Query accessor: cached, coalesced reads

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{OwnedMutexGuard, Semaphore};

use super::cache::{Fetcher, QueryCache, QueryEntry, QueryStatus};
use super::dependencies::InvalidationTarget;
use crate::application::errors::ApiError;
use crate::domain::entities::{QueryKey, ResponseEnvelope};

/// Per-call query configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// When false the query neither fetches nor reports loading
    pub enabled: bool,
    /// Overrides the client's default freshness window
    pub stale_time: Option<Duration>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            stale_time: None,
        }
    }
}

impl QueryOptions {
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = Some(stale_time);
        self
    }
}

/// What a consumer sees: same shape whether served from cache or freshly fetched
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub data: Option<Value>,
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<ApiError>,
}

impl QueryResult {
    pub fn idle() -> Self {
        Self {
            data: None,
            is_loading: false,
            is_error: false,
            error: None,
        }
    }

    fn from_entry(entry: &QueryEntry) -> Self {
        Self {
            data: entry.data.clone(),
            is_loading: entry.status == QueryStatus::Pending,
            is_error: entry.status == QueryStatus::Error,
            error: entry.error.clone(),
        }
    }

    pub fn data_as<T: DeserializeOwned>(&self) -> Option<T> {
        self.data
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Handle shared by every consumer of one cache
#[derive(Clone)]
pub struct QueryClient {
    cache: Arc<QueryCache>,
    default_stale_time: Option<Duration>,
    refetch_semaphore: Arc<Semaphore>,
}

impl QueryClient {
    pub fn new(cache: Arc<QueryCache>, default_stale_time: Option<Duration>, refetch_concurrency: usize) -> Self {
        Self {
            cache,
            default_stale_time,
            refetch_semaphore: Arc::new(Semaphore::new(refetch_concurrency.max(1))),
        }
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Read through the cache.
    ///
    /// Fresh entries are returned without calling `fetcher`. Concurrent calls
    /// for one key share a single fetch. The fetch runs on its own task, so
    /// dropping this future does not abort it; the cache still settles.
    pub async fn query<F, Fut>(&self, key: QueryKey, fetcher: F, options: QueryOptions) -> QueryResult
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ResponseEnvelope, ApiError>> + Send + 'static,
    {
        let fetcher: Fetcher = Arc::new(move || fetcher().boxed());
        self.query_with(key, fetcher, options).await
    }

    /// Current state of `key` without fetching
    pub fn state(&self, key: &QueryKey) -> QueryResult {
        self.cache
            .get(key)
            .map(|e| QueryResult::from_entry(&e))
            .unwrap_or_else(QueryResult::idle)
    }

    pub fn invalidate(&self, target: &InvalidationTarget) -> usize {
        self.cache.invalidate(target).len()
    }

    /// Refetch every stale entry that has a remembered fetcher.
    /// Returns how many refetches ran.
    pub async fn refetch_stale(&self) -> usize {
        let mut handles = Vec::new();

        for key in self.cache.stale_keys() {
            let Some(fetcher) = self.cache.fetcher(&key) else {
                continue;
            };
            let client = self.clone();
            let semaphore = self.refetch_semaphore.clone();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                client.query_with(key, fetcher, QueryOptions::default()).await
            }));
        }

        let mut ran = 0;
        for handle in handles {
            match handle.await {
                Ok(_) => ran += 1,
                Err(e) => tracing::error!("refetch task panicked: {}", e),
            }
        }
        ran
    }

    async fn query_with(&self, key: QueryKey, fetcher: Fetcher, options: QueryOptions) -> QueryResult {
        if !options.enabled {
            return QueryResult::idle();
        }
        let stale_time = options.stale_time.or(self.default_stale_time);

        let seen = self.cache.generation(&key);
        let guard = self.cache.acquire_refresh(&key).await;

        if let Some(entry) = self.cache.get(&key) {
            if entry.generation() != seen && !entry.stale {
                tracing::debug!("[{}] joined in-flight fetch", key);
                return QueryResult::from_entry(&entry);
            }
            if entry.is_fresh(stale_time) {
                tracing::debug!("[{}] cache hit", key);
                return QueryResult::from_entry(&entry);
            }
        }

        self.cache.begin_fetch(&key, fetcher.clone());
        let task = tokio::spawn(run_fetch(self.cache.clone(), key.clone(), fetcher, guard));

        match task.await {
            Ok(entry) => QueryResult::from_entry(&entry),
            Err(e) => {
                tracing::error!("[{}] fetch task failed: {}", key, e);
                let entry = self
                    .cache
                    .complete(&key, Err(ApiError::Transport(format!("fetch task failed: {}", e))));
                QueryResult::from_entry(&entry)
            }
        }
    }
}

async fn run_fetch(
    cache: Arc<QueryCache>,
    key: QueryKey,
    fetcher: Fetcher,
    _guard: OwnedMutexGuard<()>,
) -> QueryEntry {
    let result = fetcher().await;
    match &result {
        Ok(_) => tracing::debug!("[{}] fetched", key),
        Err(e) => tracing::warn!("[{}] fetch failed: {}", key, e),
    }
    cache.complete(&key, result.map(|envelope| envelope.data))
}
