#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use merchant_console::application::errors::ApiError;
use merchant_console::domain::entities::ResponseEnvelope;
use merchant_console::infrastructure::adapters::MemoryAdapter;
use merchant_console::infrastructure::api::{ApiClient, ApiRequest};
use merchant_console::infrastructure::config::Config;
use merchant_console::Dashboard;

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Scripted API: counts calls, optionally sleeps, answers per path.
/// Unscripted paths answer `{"path": ..., "call": n}`.
#[derive(Default)]
pub struct FakeApi {
    calls: AtomicUsize,
    delay: Duration,
    responses: Mutex<HashMap<String, Result<ResponseEnvelope, ApiError>>>,
    log: Mutex<Vec<ApiRequest>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }

    pub fn respond(&self, path: &str, result: Result<ResponseEnvelope, ApiError>) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), result);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }
}

#[async_trait]
impl ApiClient for FakeApi {
    async fn send(&self, request: ApiRequest) -> Result<ResponseEnvelope, ApiError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.lock().unwrap().push(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let scripted = self.responses.lock().unwrap().get(&request.path).cloned();
        scripted.unwrap_or_else(|| Ok(ResponseEnvelope::ok(json!({ "path": request.path, "call": call }))))
    }
}

pub fn dashboard(api: Arc<FakeApi>) -> (Dashboard, Arc<MemoryAdapter>) {
    ensure_init();
    let signals = Arc::new(MemoryAdapter::new());
    let dashboard = Dashboard::new(Config::default(), api, signals.clone(), signals.clone());
    (dashboard, signals)
}
