//! HTTP client for the remote invoices API
//!
//! Every [`InvoiceService`] operation is one request against
//! `{api_endpoint}/customers[...]`. Failures are logged with their cause and
//! surfaced as an [`ApiError`] whose message is the operation's generic
//! user-facing text.

use crate::config::DashboardConfig;
use crate::core::error::{ApiError, DashboardError, DashboardResult};
use crate::core::model::{
    CustomerField, InvoiceForm, InvoicePayload, InvoicesTable, LatestInvoiceRaw,
};
use crate::core::query::invoice_pages;
use crate::core::service::{ApiOperation, ITEMS_PER_PAGE, InvoiceService};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Body the API sends instead of an empty list when a search matches nothing
const NOT_FOUND_BODY: &str = "Not found";

const CUSTOMERS: &str = "customers";

/// Upper bound on how much of an error body is logged
const LOGGED_BODY_CHARS: usize = 256;

/// Production [`InvoiceService`] backed by reqwest
///
/// # Example
/// ```ignore
/// let client = ApiClient::new(&DashboardConfig::from_env()?)?;
/// let rows = client.fetch_filtered_invoices("amy", 1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &DashboardConfig) -> DashboardResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| DashboardError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Self::with_client(client, &config.api_endpoint)
    }

    /// Use a preconfigured reqwest client
    pub fn with_client(client: reqwest::Client, api_endpoint: &str) -> DashboardResult<Self> {
        let base = Url::parse(api_endpoint).map_err(|e| {
            DashboardError::Internal(format!("invalid API endpoint '{}': {}", api_endpoint, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(DashboardError::Internal(format!(
                "API endpoint '{}' cannot be used as a base URL",
                api_endpoint
            )));
        }
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/customers`, or `{base}/customers/{id}` with `id` encoded as one segment
    fn customers_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in with_client
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(CUSTOMERS);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
    }

    /// Send the request and read the full body
    async fn execute(
        &self,
        operation: ApiOperation,
        request: RequestBuilder,
    ) -> Result<(u16, String), ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(operation = %operation, error = %e, "invoice API request failed");
            ApiError::Transport {
                operation,
                source: e,
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::error!(operation = %operation, error = %e, "failed to read invoice API response");
            ApiError::Transport {
                operation,
                source: e,
            }
        })?;

        tracing::debug!(
            operation = %operation,
            status = status,
            response_len = body.len(),
            "invoice API request completed"
        );

        Ok((status, body))
    }

    /// Decode a successful JSON body into `T`
    fn decode<T: DeserializeOwned>(
        operation: ApiOperation,
        status: u16,
        body: &str,
    ) -> Result<T, ApiError> {
        if !(200..300).contains(&status) {
            tracing::error!(
                operation = %operation,
                status = status,
                response_len = body.len(),
                body = %body_excerpt(body),
                "invoice API returned an error status"
            );
            return Err(ApiError::Status { operation, status });
        }
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(operation = %operation, error = %e, "invoice API returned an unexpected body");
            ApiError::Decode {
                operation,
                source: e,
            }
        })
    }

    /// Decode a list body, where the `"Not found"` string stands for no rows
    fn decode_list<T: DeserializeOwned>(
        operation: ApiOperation,
        status: u16,
        body: &str,
    ) -> Result<Vec<T>, ApiError> {
        if let Ok(Value::String(s)) = serde_json::from_str::<Value>(body) {
            if s == NOT_FOUND_BODY {
                return Ok(Vec::new());
            }
        }
        Self::decode(operation, status, body)
    }

    async fn search(
        &self,
        operation: ApiOperation,
        params: &[(&str, String)],
    ) -> Result<Vec<InvoicesTable>, ApiError> {
        let request = self
            .request(Method::GET, self.customers_url(None))
            .query(params);
        let (status, body) = self.execute(operation, request).await?;
        Self::decode_list(operation, status, &body)
    }

    async fn mutate(
        &self,
        operation: ApiOperation,
        method: Method,
        id: Option<&str>,
        payload: Option<&InvoicePayload>,
    ) -> Result<LatestInvoiceRaw, ApiError> {
        let mut request = self.request(method, self.customers_url(id));
        if let Some(payload) = payload {
            request = request.json(payload);
        }
        let (status, body) = self.execute(operation, request).await?;
        Self::decode(operation, status, &body)
    }
}

/// Leading part of a response body, cut at a char boundary
fn body_excerpt(body: &str) -> &str {
    match body.char_indices().nth(LOGGED_BODY_CHARS) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

#[async_trait]
impl InvoiceService for ApiClient {
    #[tracing::instrument(skip(self))]
    async fn fetch_filtered_invoices(
        &self,
        query: &str,
        current_page: usize,
    ) -> DashboardResult<Vec<InvoicesTable>> {
        let params = [
            ("limit", ITEMS_PER_PAGE.to_string()),
            ("page", current_page.to_string()),
            ("search", query.to_string()),
        ];
        Ok(self
            .search(ApiOperation::FetchFilteredInvoices, &params)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_invoices_pages(&self, query: &str) -> DashboardResult<usize> {
        let params = [("search", query.to_string())];
        let rows = self
            .search(ApiOperation::FetchInvoicesPages, &params)
            .await?;
        Ok(invoice_pages(rows.len()))
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_invoice_by_id(&self, id: &str) -> DashboardResult<InvoiceForm> {
        let operation = ApiOperation::FetchInvoiceById;
        let request = self.request(Method::GET, self.customers_url(Some(id)));
        let (status, body) = self.execute(operation, request).await?;

        let mut invoice: InvoiceForm = Self::decode(operation, status, &body)?;
        invoice.amount /= 100.0;
        Ok(invoice)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_customers(&self) -> DashboardResult<Vec<CustomerField>> {
        let operation = ApiOperation::FetchCustomers;
        let request = self.request(Method::GET, self.customers_url(None));
        let (status, body) = self.execute(operation, request).await?;
        Ok(Self::decode(operation, status, &body)?)
    }

    #[tracing::instrument(skip(self, invoice), fields(customer_id = %invoice.customer_id))]
    async fn create_invoice(&self, invoice: &InvoicePayload) -> DashboardResult<LatestInvoiceRaw> {
        Ok(self
            .mutate(ApiOperation::CreateInvoice, Method::POST, None, Some(invoice))
            .await?)
    }

    #[tracing::instrument(skip(self, invoice), fields(customer_id = %invoice.customer_id))]
    async fn update_invoice(
        &self,
        id: &str,
        invoice: &InvoicePayload,
    ) -> DashboardResult<LatestInvoiceRaw> {
        Ok(self
            .mutate(ApiOperation::UpdateInvoice, Method::PUT, Some(id), Some(invoice))
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_invoice(&self, id: &str) -> DashboardResult<LatestInvoiceRaw> {
        Ok(self
            .mutate(ApiOperation::DeleteInvoice, Method::DELETE, Some(id), None)
            .await?)
    }
}
