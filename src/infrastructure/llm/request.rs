//! Request and URL construction for the two chat completion providers

use reqwest::Method;
use serde_json::json;

use crate::domain::{ChatMessage, ProviderConfig, ProviderKind};

pub const TEMPERATURE: f64 = 0.6;
pub const AZURE_MAX_TOKENS: u32 = 800;

/// Everything an HTTP client needs to issue a completion request
#[derive(Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub headers: Vec<(&'static str, String)>,
    pub body: serde_json::Value,
}

impl RequestSpec {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl std::fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(key, value)| {
                if is_credential_header(key) {
                    (*key, "[REDACTED]")
                } else {
                    (*key, value.as_str())
                }
            })
            .collect();

        f.debug_struct("RequestSpec")
            .field("method", &self.method)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

fn is_credential_header(name: &str) -> bool {
    name.eq_ignore_ascii_case("authorization") || name.eq_ignore_ascii_case("api-key")
}

/// Build the streaming completion request for the configured provider.
///
/// Azure infers the model from the deployment in the URL, so its body carries
/// no `model` field but caps `max_tokens` instead.
pub fn build_request(
    config: &ProviderConfig,
    api_key: &str,
    messages: &[ChatMessage],
) -> RequestSpec {
    match config.kind {
        ProviderKind::Azure => RequestSpec {
            method: Method::POST,
            headers: vec![
                ("Content-Type", "application/json".to_string()),
                ("api-key", api_key.to_string()),
            ],
            body: json!({
                "messages": messages,
                "temperature": TEMPERATURE,
                "stream": true,
                "max_tokens": AZURE_MAX_TOKENS,
            }),
        },
        ProviderKind::Standard => RequestSpec {
            method: Method::POST,
            headers: vec![
                ("Content-Type", "application/json".to_string()),
                ("Authorization", format!("Bearer {}", api_key)),
            ],
            body: json!({
                "model": config.model,
                "messages": messages,
                "temperature": TEMPERATURE,
                "stream": true,
            }),
        },
    }
}

/// Completion endpoint URL. `base_url` is used verbatim.
pub fn build_url(config: &ProviderConfig, base_url: &str) -> String {
    match config.kind {
        ProviderKind::Azure => format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            base_url, config.deployment, config.api_version
        ),
        ProviderKind::Standard => format!("{}/v1/chat/completions", base_url),
    }
}
