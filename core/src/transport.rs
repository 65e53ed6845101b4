//! Executes plain-data requests over the network.
//!
//! Non-2xx statuses are returned as data; only failures that produce no
//! response at all become errors.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;

use crate::error::ApiError;
use crate::http::{
    FormPart, FormValue, HttpMethod, HttpRequest, HttpResponse, RedirectPolicy, RequestBody,
};

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// `reqwest`-backed transport. Redirect handling is a client-level setting
/// in `reqwest`, so one client is kept per policy; they share nothing but
/// are cheap to clone.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    follow: reqwest::Client,
    error: reqwest::Client,
    manual: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ApiError> {
        let build = |policy: Policy| {
            reqwest::Client::builder()
                .redirect(policy)
                .build()
                .map_err(|e| ApiError::Config(e.to_string()))
        };
        Ok(Self {
            follow: build(Policy::default())?,
            error: build(Policy::custom(|attempt| attempt.error("redirects are disabled")))?,
            manual: build(Policy::none())?,
        })
    }

    fn client_for(&self, redirect: RedirectPolicy) -> &reqwest::Client {
        match redirect {
            RedirectPolicy::Follow => &self.follow,
            RedirectPolicy::Error => &self.error,
            RedirectPolicy::Manual => &self.manual,
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self
            .client_for(request.redirect)
            .request(method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Text(text) => builder.body(text),
            RequestBody::Multipart(parts) => builder.multipart(multipart(parts)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn multipart(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match part.value {
            FormValue::Text(text) => form.text(part.name, text),
            FormValue::File {
                file_name,
                mime,
                bytes,
            } => {
                let file = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&mime)
                    .map_err(|e| ApiError::Serialization(format!("invalid mime {mime:?}: {e}")))?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}
