//! Invoice form actions
//!
//! Each action follows the same sequence: validate the submission, build the
//! API payload, call the data-access layer, revalidate the invoices page and
//! tell the caller where to go next.

pub mod form;

pub use form::{FieldErrors, InvoiceFormData, ValidInvoice, validate_invoice_form};

use crate::core::error::{DashboardResult, ValidationError};
use crate::core::events::{RevalidationBus, RevalidationReason};
use crate::core::model::{CustomerProfile, InvoicePayload};
use crate::core::service::InvoiceService;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Page listing every invoice
pub const INVOICES_PATH: &str = "/dashboard/invoices";

const CREATE_FAILED: &str = "Missing Fields. Failed to Create Invoice.";
const UPDATE_FAILED: &str = "Missing Fields. Failed to Update Invoice.";

/// State handed back to the form after a rejected submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
    pub message: Option<String>,
}

impl FormState {
    pub fn invalid(errors: FieldErrors, message: &str) -> Self {
        Self {
            errors,
            message: Some(message.to_string()),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// What the caller should do once an action finished
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Navigate to the given path
    Redirect(String),
    /// Redisplay the form with these errors; nothing was sent
    Invalid(FormState),
    /// Data changed, stay on the current page
    Revalidated,
}

/// The create, update and delete actions of the invoices page
#[derive(Clone)]
pub struct InvoiceActions {
    service: Arc<dyn InvoiceService>,
    revalidation: RevalidationBus,
    profile: CustomerProfile,
    fixed_date: Option<NaiveDate>,
}

impl InvoiceActions {
    pub fn new(service: Arc<dyn InvoiceService>, revalidation: RevalidationBus) -> Self {
        Self {
            service,
            revalidation,
            profile: CustomerProfile::default(),
            fixed_date: None,
        }
    }

    /// Profile attached to every submitted invoice
    pub fn with_profile(mut self, profile: CustomerProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Stamp invoices with `date` instead of today's date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.fixed_date = Some(date);
        self
    }

    pub fn revalidation(&self) -> &RevalidationBus {
        &self.revalidation
    }

    fn today(&self) -> String {
        self.fixed_date
            .unwrap_or_else(|| Utc::now().date_naive())
            .format("%Y-%m-%d")
            .to_string()
    }

    fn payload(&self, invoice: ValidInvoice) -> InvoicePayload {
        InvoicePayload {
            amount: invoice.amount_in_cents(),
            customer_id: invoice.customer_id,
            status: invoice.status,
            date: self.today(),
            profile: self.profile.clone(),
        }
    }

    /// Create an invoice from a form submission
    ///
    /// `_prev_state` is the state returned by the previous submission of the
    /// same form; it does not influence validation.
    pub async fn create_invoice(
        &self,
        _prev_state: &FormState,
        form: &InvoiceFormData,
    ) -> DashboardResult<ActionOutcome> {
        let invoice = match validate_invoice_form(form) {
            Ok(invoice) => invoice,
            Err(errors) => {
                tracing::debug!(fields = errors.len(), "rejected invoice creation");
                return Ok(ActionOutcome::Invalid(FormState::invalid(
                    errors,
                    CREATE_FAILED,
                )));
            }
        };

        let payload = self.payload(invoice);
        tracing::info!(
            customer_id = %payload.customer_id,
            amount_cents = payload.amount,
            status = %payload.status,
            "creating invoice"
        );
        self.service.create_invoice(&payload).await?;

        self.revalidation
            .revalidate(INVOICES_PATH, RevalidationReason::InvoiceCreated);
        Ok(ActionOutcome::Redirect(INVOICES_PATH.to_string()))
    }

    /// Replace invoice `id` with a form submission
    pub async fn update_invoice(
        &self,
        id: &str,
        form: &InvoiceFormData,
    ) -> DashboardResult<ActionOutcome> {
        let id = require_id(id)?;
        let invoice = match validate_invoice_form(form) {
            Ok(invoice) => invoice,
            Err(errors) => {
                tracing::debug!(invoice_id = %id, fields = errors.len(), "rejected invoice update");
                return Ok(ActionOutcome::Invalid(FormState::invalid(
                    errors,
                    UPDATE_FAILED,
                )));
            }
        };

        let payload = self.payload(invoice);
        tracing::info!(
            invoice_id = %id,
            amount_cents = payload.amount,
            status = %payload.status,
            "updating invoice"
        );
        self.service.update_invoice(id, &payload).await?;

        self.revalidation
            .revalidate(INVOICES_PATH, RevalidationReason::InvoiceUpdated);
        Ok(ActionOutcome::Redirect(INVOICES_PATH.to_string()))
    }

    /// Delete invoice `id`
    pub async fn delete_invoice(&self, id: &str) -> DashboardResult<ActionOutcome> {
        let id = require_id(id)?;
        tracing::info!(invoice_id = %id, "deleting invoice");
        self.service.delete_invoice(id).await?;

        self.revalidation
            .revalidate(INVOICES_PATH, RevalidationReason::InvoiceDeleted);
        Ok(ActionOutcome::Revalidated)
    }
}

fn require_id(id: &str) -> DashboardResult<&str> {
    if id.trim().is_empty() {
        return Err(ValidationError::FieldError {
            field: "id".to_string(),
            message: "invoice id is required".to_string(),
        }
        .into());
    }
    Ok(id)
}
