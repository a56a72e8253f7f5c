//! Request extractors whose rejections render as [`ErrorResponse`] JSON
//!
//! axum's own `Query` and `Form` reject with a plain-text body. These
//! wrappers run the same extraction and turn the rejection into a
//! [`DashboardError`], keeping the rejection's status code.
//!
//! [`ErrorResponse`]: crate::core::error::ErrorResponse

use crate::core::error::{DashboardError, ValidationError};
use axum::{
    Form,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{FormRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Query string extractor
///
/// ```rust,ignore
/// pub async fn list_invoices(
///     DashboardQuery(params): DashboardQuery<InvoiceQuery>,
/// ) -> Result<Json<Value>, DashboardError> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct DashboardQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for DashboardQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = DashboardError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// `application/x-www-form-urlencoded` body extractor
#[derive(Debug, Clone)]
pub struct DashboardForm<T>(pub T);

impl<S, T> FromRequest<S> for DashboardForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = DashboardError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<QueryRejection> for DashboardError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected query string");
        ValidationError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
        .into()
    }
}

impl From<FormRejection> for DashboardError {
    fn from(rejection: FormRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected form body");
        ValidationError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
        .into()
    }
}
