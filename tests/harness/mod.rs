//! Shared test doubles for the integration tests

#![allow(dead_code)]

use dashboard::prelude::*;
use std::sync::{Arc, Mutex};

/// A call recorded by [`FakeInvoiceService`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchFiltered { query: String, page: usize },
    FetchPages { query: String },
    FetchById(String),
    FetchCustomers,
    Create(InvoicePayload),
    Update(String, InvoicePayload),
    Delete(String),
}

#[derive(Default)]
struct FakeState {
    invoices: Vec<InvoicesTable>,
    customers: Vec<CustomerField>,
    calls: Vec<Call>,
    failing: bool,
}

/// In-process [`InvoiceService`] recording every call
#[derive(Clone, Default)]
pub struct FakeInvoiceService {
    state: Arc<Mutex<FakeState>>,
}

impl FakeInvoiceService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_invoices(self, invoices: Vec<InvoicesTable>) -> Self {
        self.state.lock().unwrap().invoices = invoices;
        self
    }

    pub fn with_customers(self, customers: Vec<CustomerField>) -> Self {
        self.state.lock().unwrap().customers = customers;
        self
    }

    /// Make every operation fail as if the API answered 500
    pub fn failing(self) -> Self {
        self.state.lock().unwrap().failing = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, operation: ApiOperation, call: Call) -> DashboardResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing {
            return Err(ApiError::Status {
                operation,
                status: 500,
            }
            .into());
        }
        Ok(())
    }

    fn matching(&self, query: &str) -> Vec<InvoicesTable> {
        let query = query.to_lowercase();
        self.state
            .lock()
            .unwrap()
            .invoices
            .iter()
            .filter(|i| query.is_empty() || i.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl InvoiceService for FakeInvoiceService {
    async fn fetch_filtered_invoices(
        &self,
        query: &str,
        current_page: usize,
    ) -> DashboardResult<Vec<InvoicesTable>> {
        self.record(
            ApiOperation::FetchFilteredInvoices,
            Call::FetchFiltered {
                query: query.to_string(),
                page: current_page,
            },
        )?;
        Ok(self
            .matching(query)
            .into_iter()
            .skip((current_page.max(1) - 1) * ITEMS_PER_PAGE)
            .take(ITEMS_PER_PAGE)
            .collect())
    }

    async fn fetch_invoices_pages(&self, query: &str) -> DashboardResult<usize> {
        self.record(
            ApiOperation::FetchInvoicesPages,
            Call::FetchPages {
                query: query.to_string(),
            },
        )?;
        Ok(self.matching(query).len().div_ceil(ITEMS_PER_PAGE))
    }

    async fn fetch_invoice_by_id(&self, id: &str) -> DashboardResult<InvoiceForm> {
        self.record(ApiOperation::FetchInvoiceById, Call::FetchById(id.to_string()))?;
        let state = self.state.lock().unwrap();
        let row = state
            .invoices
            .iter()
            .find(|i| i.id == id)
            .ok_or(ApiError::Status {
                operation: ApiOperation::FetchInvoiceById,
                status: 404,
            })?;
        Ok(InvoiceForm {
            id: row.id.clone(),
            customer_id: row.customer_id.clone(),
            amount: row.amount / 100.0,
            status: row.status,
        })
    }

    async fn fetch_customers(&self) -> DashboardResult<Vec<CustomerField>> {
        self.record(ApiOperation::FetchCustomers, Call::FetchCustomers)?;
        Ok(self.state.lock().unwrap().customers.clone())
    }

    async fn create_invoice(&self, invoice: &InvoicePayload) -> DashboardResult<LatestInvoiceRaw> {
        self.record(ApiOperation::CreateInvoice, Call::Create(invoice.clone()))?;
        Ok(LatestInvoiceRaw {
            id: Some("inv-new".to_string()),
            name: Some(invoice.profile.name.clone()),
            image_url: Some(invoice.profile.image_url.clone()),
            email: Some(invoice.profile.email.clone()),
            amount: Some(invoice.amount as f64),
        })
    }

    async fn update_invoice(
        &self,
        id: &str,
        invoice: &InvoicePayload,
    ) -> DashboardResult<LatestInvoiceRaw> {
        self.record(
            ApiOperation::UpdateInvoice,
            Call::Update(id.to_string(), invoice.clone()),
        )?;
        Ok(LatestInvoiceRaw {
            id: Some(id.to_string()),
            amount: Some(invoice.amount as f64),
            ..Default::default()
        })
    }

    async fn delete_invoice(&self, id: &str) -> DashboardResult<LatestInvoiceRaw> {
        self.record(ApiOperation::DeleteInvoice, Call::Delete(id.to_string()))?;
        Ok(LatestInvoiceRaw {
            id: Some(id.to_string()),
            ..Default::default()
        })
    }
}

pub fn invoice_row(id: &str, name: &str, amount_cents: f64, status: InvoiceStatus) -> InvoicesTable {
    InvoicesTable {
        id: id.to_string(),
        customer_id: format!("cust-{}", id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        image_url: format!("/customers/{}.png", name.to_lowercase().replace(' ', "-")),
        date: "2024-01-15".to_string(),
        amount: amount_cents,
        status,
    }
}

pub fn customer(id: &str, name: &str) -> CustomerField {
    CustomerField {
        id: id.to_string(),
        name: name.to_string(),
    }
}
