//! Stub transport shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::auth::MemoryTokenStore;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::auth::TokenPair;

/// Replays canned responses in order and records what was sent.
#[derive(Default)]
pub(crate) struct StubTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    sent: Mutex<Vec<HttpRequest>>,
    delay: Option<Duration>,
}

impl StubTransport {
    pub(crate) fn replying(responses: Vec<(u16, &str)>) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|(status, body)| HttpResponse {
                        status,
                        headers: Vec::new(),
                        body: body.to_string(),
                    })
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Never answers within a test's lifetime.
    pub(crate) fn stalled() -> Self {
        Self {
            delay: Some(Duration::from_secs(30)),
            ..Self::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ApiError::Transport("no canned response".to_string()))
    }
}

pub(crate) fn token_store(access: &str) -> Arc<MemoryTokenStore> {
    Arc::new(MemoryTokenStore::with_tokens(TokenPair {
        access_token: access.to_string(),
        refresh_token: "refresh".to_string(),
    }))
}

pub(crate) fn stub_session(
    transport: StubTransport,
    store: Arc<MemoryTokenStore>,
) -> ApiSession<StubTransport> {
    ApiSession::new(ApiClient::new("http://api.test"), transport, store)
}
