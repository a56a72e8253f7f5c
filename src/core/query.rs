//! Query parameters and pagination utilities

use crate::core::service::ITEMS_PER_PAGE;
use serde::Deserialize;

/// Search and paging parameters of the invoices list
///
/// # Example
/// ```rust,ignore
/// // GET /dashboard/invoices?query=amy&page=2
/// pub async fn list_invoices(Query(params): Query<InvoiceQuery>) -> ... {
///     // params.query defaults to ""
///     // params.page() is at least 1
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InvoiceQuery {
    /// Free-text search forwarded to the API
    pub query: String,

    /// Page number (starts at 1)
    pub page: usize,
}

impl Default for InvoiceQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
        }
    }
}

impl InvoiceQuery {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }
}

/// Number of pages needed to show `total` items, `per_page` at a time
pub fn total_pages(total: usize, per_page: usize) -> usize {
    // Ensure per_page is at least 1 to avoid division by zero
    total.div_ceil(per_page.max(1))
}

/// Page count for the invoices table
pub fn invoice_pages(total: usize) -> usize {
    total_pages(total, ITEMS_PER_PAGE)
}
