//! Stateless HTTP request builder and response parser for the facility API.
//!
//! # Design
//! `ApiClient` holds only an `ApiConfig` and carries no mutable state between
//! calls. A call is described by `RequestParams`; `build` turns it into an
//! `HttpRequest` and `parse`/`parse_text` consume the matching
//! `HttpResponse`. The caller (usually `ApiSession`) executes the actual
//! round-trip, keeping this layer deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::body::{encode_body, Body};
use crate::config::ApiConfig;
use crate::error::{ApiError, ErrorEnvelope};
use crate::http::{set_header, ContentType, HttpMethod, HttpRequest, HttpResponse, RedirectPolicy};
use crate::query::Query;

/// Description of one API call, before base configuration is merged in.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    pub path: String,
    pub method: HttpMethod,
    pub query: Query,
    pub body: Option<(Body, ContentType)>,
    /// Attach the bearer token, and allow a refresh-and-retry on 401.
    pub secure: bool,
    pub headers: Vec<(String, String)>,
    pub redirect: Option<RedirectPolicy>,
    pub cancel_token: Option<String>,
}

impl RequestParams {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            ..Self::default()
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn body(mut self, body: impl Into<Body>, content_type: ContentType) -> Self {
        self.body = Some((body.into(), content_type));
        self
    }

    /// Serialize `input` as a JSON body.
    pub fn json<T: Serialize>(self, input: &T) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.body(value, ContentType::Json))
    }

    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        set_header(&mut self.headers, name, value);
        self
    }

    pub fn redirect(mut self, redirect: RedirectPolicy) -> Self {
        self.redirect = Some(redirect);
        self
    }

    pub fn cancel_token(mut self, token: impl Into<String>) -> Self {
        self.cancel_token = Some(token.into());
        self
    }
}

/// Successful response: status, headers and the decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub data: T,
}

/// Synchronous, stateless client for the facility API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ApiConfig::new(base_url))
    }

    pub fn with_config(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Merge `params` with the base configuration into a wire request.
    ///
    /// Headers are layered base, then bearer auth (secure calls holding a
    /// token), then per-call headers, then the declared content type.
    pub fn build(
        &self,
        params: &RequestParams,
        access_token: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let mut url = format!("{}{}", self.config.base_url, params.path);
        if !params.query.is_empty() {
            url.push('?');
            url.push_str(&params.query.encode());
        }

        let mut headers = self.config.headers.clone();
        if params.secure {
            if let Some(token) = access_token {
                set_header(&mut headers, "authorization", &format!("Bearer {token}"));
            }
        }
        for (name, value) in &params.headers {
            set_header(&mut headers, name, value);
        }

        let body = match &params.body {
            Some((body, content_type)) => {
                if *content_type != ContentType::FormData {
                    set_header(&mut headers, "content-type", content_type.mime());
                }
                encode_body(*content_type, body.clone())?
            }
            None => Default::default(),
        };

        Ok(HttpRequest {
            method: params.method,
            url,
            headers,
            body,
            redirect: params.redirect.unwrap_or(self.config.redirect),
        })
    }

    /// Decode a 2xx JSON response; any other status becomes `ApiError::Http`.
    /// An empty body decodes as JSON `null`, so `()` and `Option<T>` work for
    /// 204 responses.
    pub fn parse<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = check_status(response)?;
        let data = if response.body.trim().is_empty() {
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_str(&response.body)
        }
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(ApiResponse {
            status: response.status,
            headers: response.headers,
            data,
        })
    }

    /// Like [`ApiClient::parse`] but hands back the raw body text.
    pub fn parse_text(&self, response: HttpResponse) -> Result<ApiResponse<String>, ApiError> {
        let response = check_status(response)?;
        Ok(ApiResponse {
            status: response.status,
            headers: response.headers,
            data: response.body,
        })
    }
}

/// Map non-success status codes to `ApiError::Http`.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::Http(ErrorEnvelope::new(
        response.status,
        response.headers,
        &response.body,
    )))
}
