//! Records exchanged with the remote invoices API
//!
//! These are plain DTOs. The remote API owns identifiers, so ids are kept as
//! opaque strings rather than parsed into UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// All accepted status literals, in display order
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the status literals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown invoice status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for InvoiceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A billed party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Customer projection used to fill the customer select box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerField {
    pub id: String,
    pub name: String,
}

/// One row of the invoices table
///
/// `amount` is in cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicesTable {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: String,
    pub amount: f64,
    pub status: InvoiceStatus,
}

/// Edit-form projection of an invoice
///
/// The API stores cents; [`InvoiceService::fetch_invoice_by_id`] converts
/// `amount` to dollars before handing it out.
///
/// [`InvoiceService::fetch_invoice_by_id`]: crate::core::service::InvoiceService::fetch_invoice_by_id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: InvoiceStatus,
}

/// Contact and display metadata attached to every submitted invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl Default for CustomerProfile {
    fn default() -> Self {
        Self {
            name: "Amy Burns".to_string(),
            email: "amy@burns.com".to_string(),
            image_url: "/customers/amy-burns.png".to_string(),
        }
    }
}

/// Body sent to the API when creating or updating an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePayload {
    pub customer_id: String,
    /// Amount in cents
    pub amount: i64,
    pub status: InvoiceStatus,
    /// Submission date, `YYYY-MM-DD`
    pub date: String,
    #[serde(flatten)]
    pub profile: CustomerProfile,
}

/// Record echoed back by the API after a mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatestInvoiceRaw {
    pub id: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub amount: Option<f64>,
}
