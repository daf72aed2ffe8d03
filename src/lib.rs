//! Chat completion relay
//!
//! Builds streaming chat completion requests for OpenAI or Azure OpenAI and
//! relays the upstream event stream to clients as plain text.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{AppConfig, RelaySettings};

use std::sync::Arc;

use api::state::AppState;
use infrastructure::llm::HttpClient;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Create the application state from relay settings.
///
/// Fails when no API key is configured or the proxy URL is invalid.
pub fn create_app_state(
    settings: &RelaySettings,
    shutdown: CancellationToken,
) -> anyhow::Result<AppState> {
    let api_key = settings.require_api_key()?;

    let http_client = HttpClient::from_proxy(settings.https_proxy.as_deref())?;
    if let Some(proxy) = &settings.https_proxy {
        info!(proxy = %proxy, "Routing upstream requests through proxy");
    }

    Ok(AppState::new(
        Arc::new(http_client),
        settings.provider.clone(),
        settings.base_url.as_str(),
        api_key,
        shutdown,
    ))
}
