//! Per-domain service wrappers consumed by the dashboard.
//!
//! # Design
//! Every wrapper returns `ServiceResult<T>`. Failures of any origin
//! (transport, non-2xx, expired session, cancellation) collapse into one
//! `ServiceError` whose `message` is ready to show in a toast, with `kind`
//! left for callers that need to branch (e.g. send the user to sign-in on
//! `SessionExpired`).

use serde::de::{DeserializeOwned, IgnoredAny};

use crate::client::RequestParams;
use crate::error::ApiError;
use crate::session::ApiSession;
use crate::transport::HttpTransport;

pub mod auth;
pub mod checkout;
pub mod collections;
pub mod courts;
pub mod credit_packages;
pub mod customers;
pub mod discounts;
pub mod events;
pub mod games;
pub mod locations;
pub mod memberships;
pub mod staff;
pub mod teams;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// No response reached us.
    Network,
    /// The backend refused the request (validation, business rule, conflict).
    Rejected { status: u16 },
    NotFound,
    /// Sign-in is required again.
    SessionExpired,
    Cancelled,
    /// The request or response did not match the expected shape.
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: String,
}

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        let kind = match &err {
            ApiError::Http(envelope) if envelope.is_not_found() => ServiceErrorKind::NotFound,
            // A bare 401 (wrong password, public call) is a rejection; the
            // session reports a lost sign-in as `ApiError::SessionExpired`.
            ApiError::Http(envelope) => ServiceErrorKind::Rejected {
                status: envelope.status,
            },
            ApiError::Transport(_) => ServiceErrorKind::Network,
            ApiError::Cancelled => ServiceErrorKind::Cancelled,
            ApiError::SessionExpired => ServiceErrorKind::SessionExpired,
            ApiError::Serialization(_) | ApiError::Deserialization(_) | ApiError::Config(_) => {
                ServiceErrorKind::Invalid
            }
        };
        let message = match &err {
            ApiError::Http(envelope) => envelope.message(),
            other => other.to_string(),
        };
        Self { kind, message }
    }
}

/// Log a failed call under `context` and convert it.
pub(crate) fn failure(context: &'static str) -> impl FnOnce(ApiError) -> ServiceError {
    move |err| {
        let err = ServiceError::from(err);
        tracing::warn!(context, kind = ?err.kind, message = %err.message, "Service call failed");
        err
    }
}

/// Either a ready request or a builder that could fail while serializing.
pub(crate) trait IntoParams {
    fn into_params(self) -> Result<RequestParams, ApiError>;
}

impl IntoParams for RequestParams {
    fn into_params(self) -> Result<RequestParams, ApiError> {
        Ok(self)
    }
}

impl IntoParams for Result<RequestParams, ApiError> {
    fn into_params(self) -> Result<RequestParams, ApiError> {
        self
    }
}

/// Build, send and decode one call, logging failures under `context`.
pub(crate) async fn call<T, R>(
    session: &ApiSession<T>,
    context: &'static str,
    params: impl IntoParams,
) -> ServiceResult<R>
where
    T: HttpTransport + 'static,
    R: DeserializeOwned,
{
    let params = params.into_params().map_err(failure(context))?;
    session
        .request(params)
        .await
        .map(|response| response.data)
        .map_err(failure(context))
}

/// Like [`call`] for endpoints whose success body carries nothing the
/// caller needs (deletes): any 2xx counts, whatever the payload.
pub(crate) async fn call_discarding<T>(
    session: &ApiSession<T>,
    context: &'static str,
    params: impl IntoParams,
) -> ServiceResult<()>
where
    T: HttpTransport + 'static,
{
    let _: IgnoredAny = call(session, context, params).await?;
    Ok(())
}

/// `1250` → `$12.50`, `-500` → `-$5.00`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
