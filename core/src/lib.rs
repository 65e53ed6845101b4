//! API client core for the Courtside facility backend.
//!
//! # Overview
//! Two layers:
//! - `ApiClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern), so request
//!   construction and response decoding stay deterministic and testable.
//! - `ApiSession` runs those requests over an `HttpTransport`, adding bearer
//!   auth, the single 401 refresh-and-retry and token-keyed cancellation.
//!
//! # Design
//! - `resources` holds one call-builder per backend endpoint; `services`
//!   wraps them per domain, maps DTOs to view models and reports every
//!   failure as a `ServiceError`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod auth;
pub mod body;
pub mod cancel;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod resources;
pub mod services;
pub mod session;
#[cfg(test)]
mod testing;
pub mod transport;
pub mod types;

pub use auth::{MemoryTokenStore, RefreshEndpoint, TokenRefresher, TokenStore};
pub use body::{Body, FormData};
pub use client::{ApiClient, ApiResponse, RequestParams};
pub use config::ApiConfig;
pub use error::{ApiError, ErrorEnvelope};
pub use http::{ContentType, HttpMethod, HttpRequest, HttpResponse, RedirectPolicy, RequestBody};
pub use query::Query;
pub use services::{ServiceError, ServiceErrorKind, ServiceResult};
pub use session::ApiSession;
pub use transport::{HttpTransport, ReqwestTransport};
