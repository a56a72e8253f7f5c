use anyhow::{Context, Result};
use dashboard::prelude::*;
use tracing_subscriber::EnvFilter;

/// Optional YAML config; environment variables alone are enough otherwise
const CONFIG_PATH_ENV: &str = "DASHBOARD_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => DashboardConfig::from_yaml_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        Err(_) => DashboardConfig::from_env().context("failed to load config from environment")?,
    };

    tracing::info!(
        api_endpoint = %config.api_endpoint,
        bind_address = %config.bind_address,
        "starting invoice dashboard"
    );

    DashboardBuilder::new().with_config(config).serve().await
}
