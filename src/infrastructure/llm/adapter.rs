//! Relay an upstream completion event stream as a plain text body

use axum::body::Body;
use axum::http::{HeaderValue, header};
use axum::response::Response;
use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::http_client::{ByteStream, UpstreamResponse};
use super::sse::{UnitStream, sse_units};
use crate::domain::{DecodeStep, DeltaDecoder, DomainError};

const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Turn a raw upstream response into the response handed to our own client.
///
/// Error statuses are passed through with the upstream body untouched so the
/// caller can read the provider's error payload. Success bodies are decoded
/// into the concatenated completion text.
pub fn adapt(raw: UpstreamResponse, cancel: CancellationToken) -> Response {
    let UpstreamResponse { status, body } = raw;

    if !status.is_success() {
        warn!(status = %status, "Upstream returned an error status, passing body through");
        let mut response = Response::new(Body::from_stream(body));
        *response.status_mut() = status;
        return response;
    }

    debug!(status = %status, "Relaying completion stream");

    let mut response = Response::new(Body::from_stream(adapt_stream(body, cancel)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_CONTENT_TYPE));
    response
}

struct Relay {
    units: UnitStream,
    decoder: DeltaDecoder,
    cancel: CancellationToken,
    emitted: usize,
}

/// Decode an event-stream body into completion text chunks.
///
/// The stream yields one item per non-empty delta. It ends after `[DONE]`,
/// after the upstream ends, or once `cancel` fires. A malformed payload or a
/// transport error is yielded as a single `Err` and nothing follows it.
pub fn adapt_stream(
    body: ByteStream,
    cancel: CancellationToken,
) -> impl Stream<Item = Result<Bytes, DomainError>> + Send + 'static {
    let relay = Relay {
        units: sse_units(body),
        decoder: DeltaDecoder::new(),
        cancel,
        emitted: 0,
    };

    stream::unfold(relay, |mut relay| async move {
        loop {
            if relay.decoder.state().is_terminal() {
                return None;
            }

            let next = tokio::select! {
                biased;
                _ = relay.cancel.cancelled() => {
                    debug!(bytes = relay.emitted, "Relay cancelled, dropping upstream");
                    return None;
                }
                next = relay.units.next() => next,
            };

            match next {
                None => {
                    if relay.decoder.finish() {
                        debug!(bytes = relay.emitted, "Upstream ended without [DONE]");
                    }
                    return None;
                }
                Some(Err(e)) => {
                    relay.decoder.fail();
                    warn!(error = %e, bytes = relay.emitted, "Upstream stream failed");
                    return Some((Err(e), relay));
                }
                Some(Ok(unit)) => match relay.decoder.transition(unit) {
                    DecodeStep::Emit(text) => {
                        relay.emitted += text.len();
                        return Some((Ok(Bytes::from(text)), relay));
                    }
                    DecodeStep::Skip => continue,
                    DecodeStep::Close => {
                        debug!(bytes = relay.emitted, "Completion stream finished");
                        return None;
                    }
                    DecodeStep::Fail(e) => {
                        warn!(error = %e, bytes = relay.emitted, "Failed to decode completion chunk");
                        return Some((Err(e), relay));
                    }
                },
            }
        }
    })
}
