//! Dashboard HTTP handlers

use super::extract::{DashboardForm, DashboardQuery};
use super::page::Pages;
use crate::actions::{ActionOutcome, FormState, InvoiceActions, InvoiceFormData};
use crate::core::error::DashboardError;
use crate::core::query::InvoiceQuery;
use crate::core::service::InvoiceService;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared state of the dashboard routes
#[derive(Clone)]
pub struct DashboardState {
    pub service: Arc<dyn InvoiceService>,
    pub actions: InvoiceActions,
    pub pages: Arc<Pages>,
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Redirect(path) => Redirect::to(&path).into_response(),
            ActionOutcome::Invalid(state) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(state)).into_response()
            }
            ActionOutcome::Revalidated => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

pub async fn dashboard_page(
    State(state): State<DashboardState>,
) -> Result<Html<String>, DashboardError> {
    Ok(Html(state.pages.dashboard()?))
}

pub async fn list_invoices(
    State(state): State<DashboardState>,
    DashboardQuery(params): DashboardQuery<InvoiceQuery>,
) -> Result<Json<Value>, DashboardError> {
    let page = params.page();
    let (invoices, total_pages) = tokio::try_join!(
        state.service.fetch_filtered_invoices(&params.query, page),
        state.service.fetch_invoices_pages(&params.query),
    )?;

    Ok(Json(json!({
        "invoices": invoices,
        "query": params.query,
        "page": page,
        "total_pages": total_pages
    })))
}

pub async fn create_invoice_form(
    State(state): State<DashboardState>,
) -> Result<Json<Value>, DashboardError> {
    let customers = state.service.fetch_customers().await?;
    Ok(Json(json!({ "customers": customers })))
}

pub async fn edit_invoice_form(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, DashboardError> {
    let (invoice, customers) = tokio::try_join!(
        state.service.fetch_invoice_by_id(&id),
        state.service.fetch_customers(),
    )?;
    Ok(Json(json!({
        "invoice": invoice,
        "customers": customers
    })))
}

pub async fn create_invoice(
    State(state): State<DashboardState>,
    DashboardForm(form): DashboardForm<InvoiceFormData>,
) -> Result<ActionOutcome, DashboardError> {
    state
        .actions
        .create_invoice(&FormState::default(), &form)
        .await
}

pub async fn update_invoice(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
    DashboardForm(form): DashboardForm<InvoiceFormData>,
) -> Result<ActionOutcome, DashboardError> {
    state.actions.update_invoice(&id, &form).await
}

pub async fn delete_invoice(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> Result<ActionOutcome, DashboardError> {
    state.actions.delete_invoice(&id).await
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-dashboard"
    }))
}
