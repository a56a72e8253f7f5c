//! Core module containing the records, traits and errors shared by every layer

pub mod error;
pub mod events;
pub mod model;
pub mod query;
pub mod service;

pub use error::{ApiError, ConfigError, DashboardError, DashboardResult, ValidationError};
pub use events::{EventEnvelope, RevalidationBus, RevalidationEvent, RevalidationReason};
pub use model::{
    Customer, CustomerField, CustomerProfile, InvoiceForm, InvoicePayload, InvoiceStatus,
    InvoicesTable, LatestInvoiceRaw,
};
pub use query::InvoiceQuery;
pub use service::{ApiOperation, ITEMS_PER_PAGE, InvoiceService};
