//! Configuration loading and management

use crate::core::error::{ConfigError, DashboardResult};
use crate::core::model::CustomerProfile;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the remote API base URL
pub const API_ENDPOINT_ENV: &str = "API_ENDPOINT";

/// Environment variable overriding the listen address
pub const BIND_ADDRESS_ENV: &str = "DASHBOARD_BIND";

/// Runtime configuration of the dashboard
///
/// ```yaml
/// api_endpoint: https://api.example.com
/// bind_address: 0.0.0.0:8080
/// request_timeout_ms: 5000
/// customer_profile:
///   name: Amy Burns
///   email: amy@burns.com
///   image_url: /customers/amy-burns.png
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the remote invoices API, without trailing slash
    #[serde(default)]
    pub api_endpoint: String,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Profile attached to every created or updated invoice
    #[serde(default)]
    pub customer_profile: CustomerProfile,
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl DashboardConfig {
    /// Configuration pointing at `api_endpoint` with every other setting defaulted
    pub fn new(api_endpoint: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            bind_address: default_bind_address(),
            request_timeout_ms: default_request_timeout_ms(),
            customer_profile: CustomerProfile::default(),
        }
    }

    /// Load configuration from a YAML file
    ///
    /// Environment overrides are applied before validation.
    pub fn from_yaml_file(path: &str) -> DashboardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            })?;
        config.with_env_overrides(|key| std::env::var(key).ok()).validated()
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> DashboardResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Build configuration from the process environment alone
    pub fn from_env() -> DashboardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DashboardResult<Self> {
        Self::new(String::new())
            .with_env_overrides(lookup)
            .validated()
    }

    /// Apply `API_ENDPOINT` and `DASHBOARD_BIND` when they are set
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup(API_ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_endpoint = endpoint;
        }
        if let Some(bind) = lookup(BIND_ADDRESS_ENV).filter(|v| !v.trim().is_empty()) {
            self.bind_address = bind;
        }
        self
    }

    /// Check the configuration and normalize the endpoint
    pub fn validated(mut self) -> DashboardResult<Self> {
        let endpoint = self.api_endpoint.trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_endpoint".to_string(),
            }
            .into());
        }

        let url = reqwest::Url::parse(&endpoint).map_err(|e| ConfigError::InvalidValue {
            field: "api_endpoint".to_string(),
            value: endpoint.clone(),
            message: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "api_endpoint".to_string(),
                value: endpoint,
                message: "expected an http or https URL".to_string(),
            }
            .into());
        }

        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms".to_string(),
                value: "0".to_string(),
                message: "timeout must be greater than zero".to_string(),
            }
            .into());
        }

        self.api_endpoint = endpoint;
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
