use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::StatusCode;
use std::pin::Pin;

use super::request::RequestSpec;
use crate::domain::DomainError;

/// Stream type for HTTP responses
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, DomainError>> + Send>>;

/// Raw upstream response: status plus an undecoded body stream
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: ByteStream,
}

impl UpstreamResponse {
    pub fn new(status: StatusCode, body: ByteStream) -> Self {
        Self { status, body }
    }

    /// Response whose body yields the given chunks in order
    pub fn from_chunks(status: StatusCode, chunks: Vec<Bytes>) -> Self {
        Self::new(status, Box::pin(futures::stream::iter(chunks.into_iter().map(Ok))))
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl std::fmt::Debug for UpstreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl From<reqwest::Response> for UpstreamResponse {
    fn from(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.bytes_stream().map(|result| {
            result.map_err(|e| DomainError::provider("http", format!("Stream error: {}", e)))
        });

        Self::new(status, Box::pin(body))
    }
}

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    /// Issue the request and hand back the response without inspecting it.
    ///
    /// Non-success statuses are not errors here; only transport failures are.
    async fn send(&self, url: &str, request: &RequestSpec) -> Result<UpstreamResponse, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Client that routes HTTPS traffic through the given proxy
    pub fn with_proxy(proxy_url: &str) -> Result<Self, DomainError> {
        let proxy = reqwest::Proxy::https(proxy_url).map_err(|e| {
            DomainError::configuration(format!("Invalid proxy URL '{}': {}", proxy_url, e))
        })?;

        let client = reqwest::Client::builder()
            .proxy(proxy)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn from_proxy(proxy_url: Option<&str>) -> Result<Self, DomainError> {
        match proxy_url {
            Some(url) => Self::with_proxy(url),
            None => Ok(Self::new()),
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn send(&self, url: &str, request: &RequestSpec) -> Result<UpstreamResponse, DomainError> {
        let mut builder = self.client.request(request.method.clone(), url);

        for (key, value) in &request.headers {
            builder = builder.header(*key, value.as_str());
        }

        let response = builder
            .body(request.body.to_string())
            .send()
            .await
            .map_err(|e| DomainError::provider("http", format!("Request failed: {}", e)))?;

        Ok(UpstreamResponse::from(response))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatMessage, ProviderConfig};
    use crate::infrastructure::llm::build_request;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn collect_body(response: UpstreamResponse) -> Vec<u8> {
        let mut body = response.body;
        let mut out = Vec::new();
        while let Some(chunk) = body.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn test_send_returns_error_status_without_failing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_raw(r#"{"error":{"message":"bad key"}}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let request = build_request(
            &ProviderConfig::default(),
            "sk-wrong",
            &[ChatMessage::user("hi")],
        );
        let url = format!("{}/v1/chat/completions", server.uri());

        let response = HttpClient::new().send(&url, &request).await.unwrap();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            collect_body(response).await,
            br#"{"error":{"message":"bad key"}}"#.to_vec()
        );
    }

    #[tokio::test]
    async fn test_send_forwards_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "stream": true,
                "messages": [{"role": "user", "content": "hi"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw("data: [DONE]\n\n", "text/event-stream"))
            .expect(1)
            .mount(&server)
            .await;

        let request = build_request(
            &ProviderConfig::standard("gpt-4o-mini"),
            "sk-test",
            &[ChatMessage::user("hi")],
        );
        let url = format!("{}/v1/chat/completions", server.uri());

        let response = HttpClient::new().send(&url, &request).await.unwrap();
        assert!(response.is_success());
        assert_eq!(collect_body(response).await, b"data: [DONE]\n\n".to_vec());
    }

    #[tokio::test]
    async fn test_send_transport_failure_is_provider_error() {
        let request = build_request(&ProviderConfig::default(), "k", &[ChatMessage::user("hi")]);
        let result = HttpClient::new()
            .send("http://127.0.0.1:1/v1/chat/completions", &request)
            .await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[test]
    fn test_invalid_proxy_is_configuration_error() {
        let result = HttpClient::with_proxy("not a url");
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
