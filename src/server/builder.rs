//! DashboardBuilder for fluent API to build the HTTP server

use super::handlers::DashboardState;
use super::page::Pages;
use super::router::build_dashboard_routes;
use crate::actions::InvoiceActions;
use crate::client::ApiClient;
use crate::config::DashboardConfig;
use crate::core::events::RevalidationBus;
use crate::core::model::CustomerProfile;
use crate::core::service::InvoiceService;
use anyhow::{Context, Result};
use axum::Router;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the dashboard router
///
/// # Example
///
/// ```ignore
/// let config = DashboardConfig::from_env()?;
/// let app = DashboardBuilder::new()
///     .with_config(config)
///     .build()?;
/// ```
pub struct DashboardBuilder {
    service: Option<Arc<dyn InvoiceService>>,
    config: Option<DashboardConfig>,
    revalidation: Option<RevalidationBus>,
    profile: Option<CustomerProfile>,
    fixed_date: Option<NaiveDate>,
    custom_routes: Vec<Router>,
}

impl DashboardBuilder {
    pub fn new() -> Self {
        Self {
            service: None,
            config: None,
            revalidation: None,
            profile: None,
            fixed_date: None,
            custom_routes: Vec::new(),
        }
    }

    /// Use `config` for the API client and the customer profile
    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Serve data from `service` instead of an [`ApiClient`] built from the config
    pub fn with_service(mut self, service: impl InvoiceService + 'static) -> Self {
        self.service = Some(Arc::new(service));
        self
    }

    /// Share an existing revalidation bus, e.g. to subscribe before serving
    pub fn with_revalidation_bus(mut self, bus: RevalidationBus) -> Self {
        self.revalidation = Some(bus);
        self
    }

    /// Override the profile attached to submitted invoices
    pub fn with_profile(mut self, profile: CustomerProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Stamp submitted invoices with `date` instead of today
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.fixed_date = Some(date);
        self
    }

    /// Add routes that live next to the dashboard
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the state shared by all dashboard handlers
    pub fn build_state(&mut self) -> Result<DashboardState> {
        let service: Arc<dyn InvoiceService> = match (self.service.take(), &self.config) {
            (Some(service), _) => service,
            (None, Some(config)) => {
                Arc::new(ApiClient::new(config).context("failed to create invoice API client")?)
            }
            (None, None) => anyhow::bail!(
                "An invoice service is required. Call .with_config() or .with_service()"
            ),
        };

        let profile = self
            .profile
            .take()
            .or_else(|| self.config.as_ref().map(|c| c.customer_profile.clone()))
            .unwrap_or_default();

        let mut actions = InvoiceActions::new(
            service.clone(),
            self.revalidation.take().unwrap_or_default(),
        )
        .with_profile(profile);
        if let Some(date) = self.fixed_date {
            actions = actions.with_date(date);
        }

        let pages = Pages::new().context("failed to compile page templates")?;

        Ok(DashboardState {
            service,
            actions,
            pages: Arc::new(pages),
        })
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;
        let mut app = build_dashboard_routes(state);

        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Build the router and serve it on the configured bind address
    pub async fn serve(self) -> Result<()> {
        let bind_address = self
            .config
            .as_ref()
            .map(|c| c.bind_address.clone())
            .context("a configuration is required to serve. Call .with_config()")?;

        let app = self.build()?;
        let listener = TcpListener::bind(&bind_address)
            .await
            .with_context(|| format!("failed to bind {}", bind_address))?;

        tracing::info!(address = %bind_address, "dashboard listening");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
