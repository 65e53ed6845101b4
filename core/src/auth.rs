//! Token storage and refresh for secure calls.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::resources;
use crate::transport::HttpTransport;
use crate::types::auth::{RefreshRequest, TokenPair};

/// Where the current access and refresh tokens live.
pub trait TokenStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn set(&self, tokens: TokenPair);
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }

    fn read(&self) -> Option<TokenPair> {
        self.tokens
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn write(&self, tokens: Option<TokenPair>) {
        *self
            .tokens
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = tokens;
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.read().map(|t| t.access_token)
    }

    fn refresh_token(&self) -> Option<String> {
        self.read().map(|t| t.refresh_token)
    }

    fn set(&self, tokens: TokenPair) {
        self.write(Some(tokens));
    }

    fn clear(&self) {
        self.write(None);
    }
}

/// Obtains a new token pair after the access token was rejected.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, store: &dyn TokenStore) -> Result<(), ApiError>;
}

/// Refreshes through the backend's `/auth/refresh` endpoint, bypassing the
/// session so a failing refresh never recurses into another refresh.
pub struct RefreshEndpoint<T: HttpTransport> {
    client: ApiClient,
    transport: Arc<T>,
}

impl<T: HttpTransport> RefreshEndpoint<T> {
    pub fn new(client: ApiClient, transport: Arc<T>) -> Self {
        Self { client, transport }
    }
}

#[async_trait]
impl<T: HttpTransport> TokenRefresher for RefreshEndpoint<T> {
    async fn refresh(&self, store: &dyn TokenStore) -> Result<(), ApiError> {
        let refresh_token = store.refresh_token().ok_or(ApiError::SessionExpired)?;
        let params = resources::auth::refresh(&RefreshRequest { refresh_token })?;
        let request = self.client.build(&params, None)?;
        let response = self.transport.execute(request).await?;
        let tokens = self.client.parse::<TokenPair>(response)?.data;
        store.set(tokens);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(access: &str) -> TokenPair {
        TokenPair {
            access_token: access.to_string(),
            refresh_token: format!("{access}-refresh"),
        }
    }

    #[test]
    fn memory_store_set_and_clear() {
        let store = MemoryTokenStore::new();
        assert!(store.access_token().is_none());
        store.set(pair("a1"));
        assert_eq!(store.access_token().as_deref(), Some("a1"));
        assert_eq!(store.refresh_token().as_deref(), Some("a1-refresh"));
        store.clear();
        assert!(store.refresh_token().is_none());
    }

    #[test]
    fn with_tokens_seeds_the_store() {
        let store = MemoryTokenStore::with_tokens(pair("seed"));
        assert_eq!(store.access_token().as_deref(), Some("seed"));
    }
}
