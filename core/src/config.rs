//! Base configuration shared by every request.

use crate::error::ApiError;
use crate::http::{set_header, RedirectPolicy};

pub const API_URL_VAR: &str = "COURTSIDE_API_URL";
pub const REDIRECT_VAR: &str = "COURTSIDE_REDIRECT";

/// Base address, default headers and redirect policy merged into each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub headers: Vec<(String, String)>,
    pub redirect: RedirectPolicy,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: Vec::new(),
            redirect: RedirectPolicy::default(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        set_header(&mut self.headers, name, value);
        self
    }

    pub fn with_redirect(mut self, redirect: RedirectPolicy) -> Self {
        self.redirect = redirect;
        self
    }

    /// Read the configuration from the environment, loading `.env` first.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(API_URL_VAR)
            .map_err(|_| ApiError::Config(format!("{API_URL_VAR} must be set")))?;
        let redirect = match std::env::var(REDIRECT_VAR) {
            Ok(raw) => raw.parse().map_err(ApiError::Config)?,
            Err(_) => RedirectPolicy::default(),
        };
        let config = Self::new(&base_url).with_redirect(redirect);
        config.validate()?;
        Ok(config)
    }

    /// Check that the base address is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base url {:?}: {e}", self.base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ApiError::Config(format!("unsupported scheme: {other}"))),
        }
    }
}
