//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;
use crate::domain::entities::{PlanKey, PlanKeys};

/// Dashboard configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub plans: PlanKeys,
    pub merchant: MerchantConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CacheConfig {
    /// Freshness window for queries; absent means cached data never expires by age
    pub default_stale_ms: Option<u64>,
    pub refetch_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MerchantConfig {
    pub plan: PlanKey,
    pub currency: String,
    pub commission_percent: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct NotificationConfig {
    pub fallback_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8080/api".to_string(),
                timeout_secs: 30,
                token: None,
            },
            cache: CacheConfig {
                default_stale_ms: None,
                refetch_concurrency: 8,
            },
            plans: PlanKeys::default(),
            merchant: MerchantConfig {
                plan: PlanKey::new("RETAIL"),
                currency: "USD".to_string(),
                commission_percent: 2.5,
            },
            notifications: NotificationConfig {
                fallback_message: "Something went wrong, please try again".to_string(),
            },
        }
    }
}

impl CacheConfig {
    pub fn default_stale_time(&self) -> Option<Duration> {
        self.default_stale_ms.map(Duration::from_millis)
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("api.base-url".to_string()));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(format!(
                "api.base-url must be http(s): {}",
                self.api.base_url
            )));
        }
        if self.cache.refetch_concurrency == 0 {
            return Err(ConfigError::InvalidValue(
                "cache.refetch-concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Override fields from environment variables where set
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("DASHBOARD_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(token) = std::env::var("DASHBOARD_API_TOKEN") {
            self.api.token = Some(token);
        }
        if let Ok(ms) = std::env::var("DASHBOARD_STALE_MS") {
            if let Ok(ms) = ms.parse() {
                self.cache.default_stale_ms = Some(ms);
            }
        }
        if let Ok(plan) = std::env::var("MERCHANT_PLAN") {
            self.merchant.plan = PlanKey::new(plan);
        }

        let plans = [
            ("PLAN_KEY_RETAIL", &mut self.plans.retail),
            ("PLAN_KEY_WHOLESALE", &mut self.plans.wholesale),
            ("PLAN_KEY_HOTELS", &mut self.plans.hotels_and_apartments),
            ("PLAN_KEY_REAL_ESTATE", &mut self.plans.real_estate),
            ("PLAN_KEY_FOOD_MART", &mut self.plans.food_mart),
        ];
        for (var, slot) in plans {
            if let Ok(key) = std::env::var(var) {
                *slot = PlanKey::new(key);
            }
        }
    }
}
