//! Chat completion transport and stream relaying

mod adapter;
mod http_client;
mod request;
mod sse;

pub use adapter::{adapt, adapt_stream};
pub use http_client::{ByteStream, HttpClient, HttpClientTrait, UpstreamResponse};
pub use request::{AZURE_MAX_TOKENS, RequestSpec, TEMPERATURE, build_request, build_url};
pub use sse::{UnitStream, sse_units};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
