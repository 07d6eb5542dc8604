//! Data layer of the merchant admin dashboard: endpoint bindings, a coalescing
//! query cache, mutations with result notifications, and plan-based gating.

pub mod application;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use application::dispatch::ResultDispatcher;
use application::errors::ApiError;
use application::query::{QueryCache, QueryClient};
use domain::traits::{Navigator, Notifier};
use infrastructure::api::{endpoints, ApiClient, HttpApiClient};
use infrastructure::config::Config;

/// Everything a dashboard session shares, built once at startup
#[derive(Clone)]
pub struct Dashboard {
    pub config: Config,
    pub api: Arc<dyn ApiClient>,
    pub queries: QueryClient,
    pub dispatcher: ResultDispatcher,
}

impl Dashboard {
    pub fn new(
        config: Config,
        api: Arc<dyn ApiClient>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let cache = Arc::new(QueryCache::new(endpoints::default_graph()));
        let queries = QueryClient::new(
            cache,
            config.cache.default_stale_time(),
            config.cache.refetch_concurrency,
        );
        let dispatcher = ResultDispatcher::new(
            notifier,
            navigator,
            queries.clone(),
            config.notifications.fallback_message.clone(),
        );

        Self {
            config,
            api,
            queries,
            dispatcher,
        }
    }

    /// Same as [`Dashboard::new`] with the HTTP client from `config.api`
    pub fn connect(
        config: Config,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let api: Arc<dyn ApiClient> = Arc::new(HttpApiClient::new(&config.api)?);
        Ok(Self::new(config, api, notifier, navigator))
    }
}
