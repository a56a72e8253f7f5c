//! Route table of the dashboard

use super::handlers::{
    DashboardState, create_invoice, create_invoice_form, dashboard_page, delete_invoice,
    edit_invoice_form, health_check, list_invoices, update_invoice,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the dashboard routes
///
/// - GET  /dashboard                      - Dashboard page
/// - GET  /dashboard/invoices             - Search invoices (`?query=&page=`)
/// - POST /dashboard/invoices             - Create invoice (form-encoded)
/// - GET  /dashboard/invoices/create      - Data for the create form
/// - POST /dashboard/invoices/{id}        - Update invoice (form-encoded)
/// - GET  /dashboard/invoices/{id}/edit   - Data for the edit form
/// - POST /dashboard/invoices/{id}/delete - Delete invoice
/// - GET  /health, /healthz               - Health check
pub fn build_dashboard_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_page))
        .route(
            "/dashboard/invoices",
            get(list_invoices).post(create_invoice),
        )
        .route("/dashboard/invoices/create", get(create_invoice_form))
        .route("/dashboard/invoices/{id}", post(update_invoice))
        .route("/dashboard/invoices/{id}/edit", get(edit_invoice_form))
        .route("/dashboard/invoices/{id}/delete", post(delete_invoice))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .with_state(state)
}
