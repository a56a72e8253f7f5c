//! HTTP surface of the dashboard
//!
//! The dashboard page, the JSON endpoints feeding the invoice table and forms,
//! and the form-post endpoints that run the invoice actions.

pub mod builder;
pub mod extract;
pub mod handlers;
pub mod page;
pub mod router;

pub use builder::DashboardBuilder;
pub use handlers::DashboardState;
pub use page::Pages;
