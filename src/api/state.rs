//! Application state shared by the handlers

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::ProviderConfig;
use crate::infrastructure::llm::HttpClientTrait;

/// Everything a relay request needs, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub http_client: Arc<dyn HttpClientTrait>,
    pub provider: Arc<ProviderConfig>,
    pub base_url: Arc<str>,
    pub api_key: Arc<str>,
    /// Cancelled on shutdown; each relay gets a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        http_client: Arc<dyn HttpClientTrait>,
        provider: ProviderConfig,
        base_url: impl Into<Arc<str>>,
        api_key: impl Into<Arc<str>>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            http_client,
            provider: Arc::new(provider),
            base_url: base_url.into(),
            api_key: api_key.into(),
            shutdown,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("http_client", &self.http_client)
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
