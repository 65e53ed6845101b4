//! Async request runtime: auth, cancellation and the 401 refresh-retry.
//!
//! # Design
//! `ApiSession` drives `ApiClient` against an `HttpTransport`. A secure call
//! that comes back 401 gets exactly one refresh-and-retry. Refreshes are
//! serialized: callers rejected with the same access token share one
//! refresh, and only a refresh that fails for the current refresh token
//! clears the store. A call carrying a cancellation token races its
//! whole lifetime, refresh included, against the token's handle.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::auth::{RefreshEndpoint, TokenRefresher, TokenStore};
use crate::cancel::CancelRegistry;
use crate::client::{ApiClient, ApiResponse, RequestParams};
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::transport::HttpTransport;

pub struct ApiSession<T: HttpTransport> {
    client: ApiClient,
    transport: Arc<T>,
    tokens: Arc<dyn TokenStore>,
    refresher: Option<Arc<dyn TokenRefresher>>,
    refresh_lock: Mutex<()>,
    cancels: CancelRegistry,
}

impl<T: HttpTransport + 'static> ApiSession<T> {
    pub fn new(client: ApiClient, transport: T, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            transport: Arc::new(transport),
            tokens,
            refresher: None,
            refresh_lock: Mutex::new(()),
            cancels: CancelRegistry::new(),
        }
    }

    /// Refresh through the backend's own refresh endpoint.
    pub fn with_refresh_endpoint(self) -> Self {
        let endpoint = RefreshEndpoint::new(self.client.clone(), Arc::clone(&self.transport));
        self.with_refresher(Arc::new(endpoint))
    }

    pub fn with_refresher(mut self, refresher: Arc<dyn TokenRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    /// Execute `params` and decode a JSON payload.
    pub async fn request<R: DeserializeOwned>(
        &self,
        params: RequestParams,
    ) -> Result<ApiResponse<R>, ApiError> {
        let response = self.send(&params).await?;
        self.client.parse(response)
    }

    /// Execute `params` and return the raw body text.
    pub async fn request_text(&self, params: RequestParams) -> Result<ApiResponse<String>, ApiError> {
        let response = self.send(&params).await?;
        self.client.parse_text(response)
    }

    /// Cancel every in-flight call made with `token`.
    pub fn abort_request(&self, token: &str) -> bool {
        let aborted = self.cancels.abort(token);
        tracing::debug!(token, aborted, "Abort requested");
        aborted
    }

    async fn send(&self, params: &RequestParams) -> Result<HttpResponse, ApiError> {
        let Some(token) = &params.cancel_token else {
            return self.send_authorized(params).await;
        };
        let registration = self.cancels.acquire(token);
        let result = tokio::select! {
            _ = registration.handle.cancelled() => {
                tracing::debug!(token = %token, path = %params.path, "Request cancelled");
                Err(ApiError::Cancelled)
            }
            result = self.send_authorized(params) => result,
        };
        self.cancels.release(token, &registration);
        result
    }

    async fn send_authorized(&self, params: &RequestParams) -> Result<HttpResponse, ApiError> {
        let access_token = self.tokens.access_token();
        let response = self.execute(params, access_token.as_deref()).await?;
        if response.status != 401 || !params.secure {
            return Ok(response);
        }
        let Some(refresher) = &self.refresher else {
            tracing::warn!(path = %params.path, "Access token rejected, no refresher configured");
            return Err(ApiError::SessionExpired);
        };

        self.refresh_once(refresher.as_ref(), access_token.as_deref(), &params.path)
            .await?;
        let access_token = self.tokens.access_token();
        self.execute(params, access_token.as_deref()).await
    }

    /// Refresh after `rejected` was refused. Callers queue on the lock; whoever
    /// finds the stored token already replaced just retries with it.
    async fn refresh_once(
        &self,
        refresher: &dyn TokenRefresher,
        rejected: Option<&str>,
        path: &str,
    ) -> Result<(), ApiError> {
        let _guard = self.refresh_lock.lock().await;
        let current = self.tokens.access_token();
        if current.as_deref() != rejected {
            // Refreshed, or signed out, while this call waited.
            return match current {
                Some(_) => Ok(()),
                None => Err(ApiError::SessionExpired),
            };
        }

        tracing::info!(path, "Access token rejected, refreshing");
        let refresh_token = self.tokens.refresh_token();
        if let Err(e) = refresher.refresh(self.tokens.as_ref()).await {
            tracing::warn!(error = %e, "Token refresh failed, clearing session");
            if self.tokens.refresh_token() == refresh_token {
                self.tokens.clear();
            }
            return Err(ApiError::SessionExpired);
        }
        Ok(())
    }

    async fn execute(
        &self,
        params: &RequestParams,
        access_token: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.client.build(params, access_token)?;
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");
        self.transport.execute(request).await
    }
}
