//! # Invoice Dashboard
//!
//! Server-side presentation and data-access layer for an invoice management
//! dashboard. It has no business logic of its own: it renders the dashboard
//! page, forwards reads and writes to a remote invoices API, and validates
//! invoice forms before they are submitted.
//!
//! ## Layers
//!
//! - **client**: [`ApiClient`](client::ApiClient), one HTTP call per operation of
//!   the [`InvoiceService`](core::service::InvoiceService) trait
//! - **actions**: form validation, dollars to cents conversion, API call,
//!   revalidation of `/dashboard/invoices`, redirect
//! - **server**: the axum router serving the page and the form endpoints
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! let config = DashboardConfig::from_env()?; // reads API_ENDPOINT
//! let app = DashboardBuilder::new().with_config(config).build()?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod actions;
pub mod client;
pub mod config;
pub mod core;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ApiError, ConfigError, DashboardError, DashboardResult, ValidationError},
        events::{EventEnvelope, RevalidationBus, RevalidationEvent, RevalidationReason},
        model::{
            Customer, CustomerField, CustomerProfile, InvoiceForm, InvoicePayload, InvoiceStatus,
            InvoicesTable, LatestInvoiceRaw,
        },
        query::InvoiceQuery,
        service::{ApiOperation, ITEMS_PER_PAGE, InvoiceService},
    };

    // === Actions ===
    pub use crate::actions::{
        ActionOutcome, FormState, INVOICES_PATH, InvoiceActions, InvoiceFormData,
    };

    // === Client ===
    pub use crate::client::ApiClient;

    // === Config ===
    pub use crate::config::DashboardConfig;

    // === Server ===
    pub use crate::server::{DashboardBuilder, DashboardState};

    // === External dependencies ===
    pub use async_trait::async_trait;
}
