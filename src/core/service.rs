//! Service trait for invoice data access

use crate::core::error::DashboardResult;
use crate::core::model::{
    CustomerField, InvoiceForm, InvoicePayload, InvoicesTable, LatestInvoiceRaw,
};
use async_trait::async_trait;
use std::fmt;

/// Number of invoice rows shown per dashboard page
pub const ITEMS_PER_PAGE: usize = 6;

/// Data-access operations backing the dashboard
///
/// Each operation maps to exactly one call against the remote invoices API.
/// The production implementation is [`ApiClient`]; tests plug in fakes.
///
/// [`ApiClient`]: crate::client::ApiClient
#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// One page of invoices matching `query`
    async fn fetch_filtered_invoices(
        &self,
        query: &str,
        current_page: usize,
    ) -> DashboardResult<Vec<InvoicesTable>>;

    /// Number of pages needed to show every invoice matching `query`
    async fn fetch_invoices_pages(&self, query: &str) -> DashboardResult<usize>;

    /// A single invoice with its amount converted to dollars
    async fn fetch_invoice_by_id(&self, id: &str) -> DashboardResult<InvoiceForm>;

    /// All customers, for the customer select box
    async fn fetch_customers(&self) -> DashboardResult<Vec<CustomerField>>;

    async fn create_invoice(&self, invoice: &InvoicePayload) -> DashboardResult<LatestInvoiceRaw>;

    async fn update_invoice(
        &self,
        id: &str,
        invoice: &InvoicePayload,
    ) -> DashboardResult<LatestInvoiceRaw>;

    async fn delete_invoice(&self, id: &str) -> DashboardResult<LatestInvoiceRaw>;
}

/// Identifies a data-access operation in logs and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    FetchFilteredInvoices,
    FetchInvoicesPages,
    FetchInvoiceById,
    FetchCustomers,
    CreateInvoice,
    UpdateInvoice,
    DeleteInvoice,
}

impl ApiOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiOperation::FetchFilteredInvoices => "fetch_filtered_invoices",
            ApiOperation::FetchInvoicesPages => "fetch_invoices_pages",
            ApiOperation::FetchInvoiceById => "fetch_invoice_by_id",
            ApiOperation::FetchCustomers => "fetch_customers",
            ApiOperation::CreateInvoice => "create_invoice",
            ApiOperation::UpdateInvoice => "update_invoice",
            ApiOperation::DeleteInvoice => "delete_invoice",
        }
    }

    /// The message shown to users when this operation fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            ApiOperation::FetchFilteredInvoices => "Failed to fetch invoices.",
            ApiOperation::FetchInvoicesPages => "Failed to fetch total number of invoices.",
            ApiOperation::FetchInvoiceById => "Failed to fetch invoice.",
            ApiOperation::FetchCustomers => "Failed to fetch all customers.",
            ApiOperation::CreateInvoice => "Failed to create invoice.",
            ApiOperation::UpdateInvoice => "Failed to update invoice.",
            ApiOperation::DeleteInvoice => "Failed to delete invoice.",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
