//! Process-wide store of query results

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use futures::future::BoxFuture;
use serde_json::Value;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::dependencies::{InvalidationGraph, InvalidationTarget};
use crate::application::errors::ApiError;
use crate::domain::entities::{QueryKey, ResponseEnvelope};

/// Re-runnable read remembered per key so stale entries can be refetched
pub type Fetcher =
    Arc<dyn Fn() -> BoxFuture<'static, Result<ResponseEnvelope, ApiError>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Pending,
    Success,
    Error,
}

/// Cache record for one query key
#[derive(Debug, Clone)]
pub struct QueryEntry {
    pub data: Option<Value>,
    pub status: QueryStatus,
    pub error: Option<ApiError>,
    pub last_fetched_at: Option<DateTime<Utc>>,
    pub stale: bool,
    fetched_at: Option<Instant>,
    generation: u64,
    // bumped by invalidate; a fetch that started under an older value settles stale
    invalidations: u64,
    fetch_started_at: u64,
}

impl QueryEntry {
    fn pending() -> Self {
        Self {
            data: None,
            status: QueryStatus::Pending,
            error: None,
            last_fetched_at: None,
            stale: false,
            fetched_at: None,
            generation: 0,
            invalidations: 0,
            fetch_started_at: 0,
        }
    }

    /// Servable without a refetch: settled successfully, not invalidated,
    /// and younger than `stale_time` (`None` never expires)
    pub fn is_fresh(&self, stale_time: Option<Duration>) -> bool {
        if self.status != QueryStatus::Success || self.stale {
            return false;
        }
        match (stale_time, self.fetched_at) {
            (None, _) => true,
            (Some(window), Some(at)) => at.elapsed() < window,
            (Some(_), None) => false,
        }
    }

    /// Bumped every time a fetch settles or data is set
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn settle(&mut self, status: QueryStatus) {
        self.status = status;
        self.stale = false;
        self.fetch_started_at = self.invalidations;
        self.last_fetched_at = Some(Utc::now());
        self.fetched_at = Some(Instant::now());
        self.generation += 1;
    }
}

pub struct QueryCache {
    entries: DashMap<QueryKey, QueryEntry>,
    operation_index: DashMap<Arc<str>, DashSet<QueryKey>>,
    refresh_locks: DashMap<QueryKey, Arc<Mutex<()>>>,
    fetchers: DashMap<QueryKey, Fetcher>,
    graph: InvalidationGraph,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(InvalidationGraph::new())
    }
}

impl QueryCache {
    pub fn new(graph: InvalidationGraph) -> Self {
        Self {
            entries: DashMap::new(),
            operation_index: DashMap::new(),
            refresh_locks: DashMap::new(),
            fetchers: DashMap::new(),
            graph,
        }
    }

    pub fn graph(&self) -> &InvalidationGraph {
        &self.graph
    }

    pub fn get(&self, key: &QueryKey) -> Option<QueryEntry> {
        self.entries.get(key).map(|e| e.value().clone())
    }

    /// Write data directly, as if a fetch had just succeeded
    pub fn set(&self, key: QueryKey, data: Value) {
        self.index(&key);
        let mut entry = self.entries.entry(key).or_insert_with(QueryEntry::pending);
        entry.data = Some(data);
        entry.error = None;
        entry.settle(QueryStatus::Success);
    }

    /// Mark matching entries stale; returns the keys that were marked
    pub fn invalidate(&self, target: &InvalidationTarget) -> Vec<QueryKey> {
        let keys = match target {
            InvalidationTarget::Key(key) => {
                if self.entries.contains_key(key) {
                    vec![key.clone()]
                } else {
                    Vec::new()
                }
            }
            InvalidationTarget::Operation(name) => self.keys_for_operation(name),
            InvalidationTarget::Resource(resource) => self
                .graph
                .operations(*resource)
                .into_iter()
                .flat_map(|op| self.keys_for_operation(op))
                .collect(),
            InvalidationTarget::All => self.keys(),
        };

        for key in &keys {
            if let Some(mut entry) = self.entries.get_mut(key) {
                entry.stale = true;
                entry.invalidations += 1;
            }
        }

        tracing::debug!("invalidated {} cache entries for {:?}", keys.len(), target);
        keys
    }

    pub fn remove(&self, key: &QueryKey) {
        self.entries.remove(key);
        if let Some(set) = self.operation_index.get(key.operation()) {
            set.remove(key);
            if set.is_empty() {
                drop(set);
                self.operation_index
                    .remove_if(key.operation(), |_, v| v.is_empty());
            }
        }
        // a fetch still holding the lock keeps it, so later requesters queue behind it
        self.refresh_locks
            .remove_if(key, |_, lock| Arc::strong_count(lock) == 1);
        self.fetchers.remove(key);
    }

    pub fn keys(&self) -> Vec<QueryKey> {
        self.entries.iter().map(|r| r.key().clone()).collect()
    }

    pub fn stale_keys(&self) -> Vec<QueryKey> {
        self.entries
            .iter()
            .filter(|r| r.value().stale)
            .map(|r| r.key().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn generation(&self, key: &QueryKey) -> u64 {
        self.entries.get(key).map(|e| e.generation).unwrap_or(0)
    }

    /// Serialize fetches per key; the guard is owned so it can travel with the fetch task
    pub(crate) async fn acquire_refresh(&self, key: &QueryKey) -> OwnedMutexGuard<()> {
        let lock = self
            .refresh_locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();

        lock.lock_owned().await
    }

    pub(crate) fn begin_fetch(&self, key: &QueryKey, fetcher: Fetcher) {
        self.index(key);
        self.fetchers.insert(key.clone(), fetcher);
        let mut entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(QueryEntry::pending);
        entry.status = QueryStatus::Pending;
        entry.fetch_started_at = entry.invalidations;
    }

    pub(crate) fn complete(&self, key: &QueryKey, result: Result<Value, ApiError>) -> QueryEntry {
        let mut entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(QueryEntry::pending);
        let invalidated_mid_fetch = entry.invalidations != entry.fetch_started_at;

        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.error = None;
                entry.settle(QueryStatus::Success);
            }
            Err(error) => {
                // previous data stays visible next to the error
                entry.error = Some(error);
                entry.settle(QueryStatus::Error);
            }
        }
        if invalidated_mid_fetch {
            // the response may predate the write that invalidated it
            tracing::debug!("[{}] invalidated while fetching, kept stale", key);
            entry.stale = true;
        }
        entry.value().clone()
    }

    pub(crate) fn fetcher(&self, key: &QueryKey) -> Option<Fetcher> {
        self.fetchers.get(key).map(|f| f.value().clone())
    }

    fn index(&self, key: &QueryKey) {
        self.operation_index
            .entry(key.operation_arc())
            .or_default()
            .insert(key.clone());
    }

    fn keys_for_operation(&self, operation: &str) -> Vec<QueryKey> {
        self.operation_index
            .get(operation)
            .map(|set| set.iter().map(|k| k.key().clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ResourceKind;
    use futures::FutureExt;
    use serde_json::json;

    fn cache() -> QueryCache {
        let mut graph = InvalidationGraph::new();
        graph.register(ResourceKind::Listing, &["__listings", "__listById"]);
        QueryCache::new(graph)
    }

    #[test]
    fn test_set_then_get() {
        let cache = cache();
        let key = QueryKey::with_params("__listById", json!({ "id": 1 }));
        cache.set(key.clone(), json!({ "title": "Loft" }));

        let entry = cache.get(&key).unwrap();
        assert_eq!(entry.status, QueryStatus::Success);
        assert_eq!(entry.data, Some(json!({ "title": "Loft" })));
        assert!(entry.last_fetched_at.is_some());
        assert!(entry.is_fresh(None));
    }

    #[test]
    fn test_operation_invalidation_is_exact() {
        let cache = cache();
        let a = QueryKey::with_params("__listById", json!({ "id": 1 }));
        let b = QueryKey::with_params("__listById", json!({ "id": 2 }));
        let other = QueryKey::new("__listByIdHistory");
        cache.set(a.clone(), json!(1));
        cache.set(b.clone(), json!(2));
        cache.set(other.clone(), json!(3));

        let mut marked = cache.invalidate(&InvalidationTarget::operation("__listById"));
        marked.sort_by_key(|k| k.to_string());

        assert_eq!(marked, vec![a.clone(), b.clone()]);
        assert!(cache.get(&a).unwrap().stale);
        assert!(cache.get(&b).unwrap().stale);
        assert!(!cache.get(&other).unwrap().stale);
    }

    #[test]
    fn test_resource_invalidation_uses_graph() {
        let cache = cache();
        let list = QueryKey::new("__listings");
        let offers = QueryKey::new("__offers");
        cache.set(list.clone(), json!([]));
        cache.set(offers.clone(), json!([]));

        let marked = cache.invalidate(&InvalidationTarget::Resource(ResourceKind::Listing));
        assert_eq!(marked, vec![list.clone()]);
        assert!(!cache.get(&list).unwrap().is_fresh(None));
        assert!(cache.get(&offers).unwrap().is_fresh(None));
    }

    #[test]
    fn test_stale_time_window() {
        let cache = cache();
        let key = QueryKey::new("__offers");
        cache.set(key.clone(), json!([]));
        let entry = cache.get(&key).unwrap();

        assert!(entry.is_fresh(Some(Duration::from_millis(5000))));
        assert!(!entry.is_fresh(Some(Duration::ZERO)));
    }

    #[test]
    fn test_error_keeps_previous_data() {
        let cache = cache();
        let key = QueryKey::new("__offers");
        cache.set(key.clone(), json!(["a"]));
        let entry = cache.complete(&key, Err(ApiError::Transport("down".into())));

        assert_eq!(entry.status, QueryStatus::Error);
        assert_eq!(entry.data, Some(json!(["a"])));
        assert!(!entry.is_fresh(None));
    }

    #[test]
    fn test_remove_cleans_index() {
        let cache = cache();
        let key = QueryKey::new("__listings");
        cache.set(key.clone(), json!([]));
        cache.remove(&key);

        assert!(cache.is_empty());
        assert!(cache.invalidate(&InvalidationTarget::operation("__listings")).is_empty());
    }

    #[test]
    fn test_invalidation_during_fetch_survives_settle() {
        let cache = cache();
        let key = QueryKey::with_params("__listById", json!({ "id": 1 }));
        cache.set(key.clone(), json!({ "v": 1 }));

        let fetcher: Fetcher = Arc::new(|| async { Ok::<_, ApiError>(ResponseEnvelope::ok(json!(null))) }.boxed());
        cache.begin_fetch(&key, fetcher.clone());
        cache.invalidate(&InvalidationTarget::Key(key.clone()));
        let entry = cache.complete(&key, Ok(json!({ "v": 2 })));

        assert_eq!(entry.data, Some(json!({ "v": 2 })));
        assert!(entry.stale);
        assert!(!entry.is_fresh(None));
        assert_eq!(cache.stale_keys(), vec![key.clone()]);

        // a fetch begun after the invalidation settles fresh
        cache.begin_fetch(&key, fetcher);
        assert!(cache.complete(&key, Ok(json!({ "v": 3 }))).is_fresh(None));
    }

    #[tokio::test]
    async fn test_remove_keeps_lock_held_by_fetch() {
        let cache = cache();
        let key = QueryKey::new("__listings");
        cache.set(key.clone(), json!([]));

        let guard = cache.acquire_refresh(&key).await;
        cache.remove(&key);

        let second = tokio::time::timeout(Duration::from_millis(20), cache.acquire_refresh(&key)).await;
        assert!(second.is_err());

        drop(guard);
        cache.remove(&key);
        let third = tokio::time::timeout(Duration::from_millis(20), cache.acquire_refresh(&key)).await;
        assert!(third.is_ok());
    }
}
