//! Server-Sent Events framing on top of a raw body stream

use eventsource_stream::{EventStreamError, Eventsource};
use futures::stream::{self, Stream, StreamExt};
use std::pin::Pin;

use super::http_client::ByteStream;
use crate::domain::{DomainError, SseUnit};

pub type UnitStream = Pin<Box<dyn Stream<Item = Result<SseUnit, DomainError>> + Send>>;

/// Decode a body into event-stream units in arrival order.
///
/// Events and UTF-8 sequences may straddle chunk boundaries; the parser
/// buffers until an event is complete. A `retry:` field is reported as a
/// [`SseUnit::ReconnectInterval`] ahead of the event that carried it.
pub fn sse_units(body: ByteStream) -> UnitStream {
    let units = body.eventsource().flat_map(|result| {
        let units: Vec<Result<SseUnit, DomainError>> = match result {
            Ok(event) => {
                let mut units = Vec::with_capacity(2);
                if let Some(retry) = event.retry {
                    units.push(Ok(SseUnit::ReconnectInterval(retry)));
                }
                units.push(Ok(SseUnit::Event { data: event.data }));
                units
            }
            Err(e) => vec![Err(map_stream_error(e))],
        };
        stream::iter(units)
    });

    Box::pin(units)
}

fn map_stream_error(err: EventStreamError<DomainError>) -> DomainError {
    match err {
        EventStreamError::Transport(e) => e,
        EventStreamError::Utf8(e) => {
            DomainError::stream_decode(format!("Invalid UTF-8 in event stream: {}", e))
        }
        EventStreamError::Parser(e) => {
            DomainError::stream_decode(format!("Malformed event stream: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::time::Duration;

    fn body(chunks: Vec<&'static [u8]>) -> ByteStream {
        Box::pin(stream::iter(
            chunks.into_iter().map(|c| Ok(Bytes::from_static(c))),
        ))
    }

    async fn collect(chunks: Vec<&'static [u8]>) -> Vec<SseUnit> {
        sse_units(body(chunks))
            .map(|unit| unit.unwrap())
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_events_in_order() {
        let units = collect(vec![&b"data: one\n\ndata: two\n\n"[..], &b"data: [DONE]\n\n"[..]]).await;
        assert_eq!(
            units,
            vec![
                SseUnit::event("one"),
                SseUnit::event("two"),
                SseUnit::event("[DONE]"),
            ]
        );
    }

    #[tokio::test]
    async fn test_event_split_across_chunks() {
        let units = collect(vec![&b"da"[..], &b"ta: {\"a\":"[..], &b"1}\n"[..], &b"\n"[..]]).await;
        assert_eq!(units, vec![SseUnit::event("{\"a\":1}")]);
    }

    #[tokio::test]
    async fn test_multibyte_character_split_across_chunks() {
        // "你" is E4 BD A0
        let units = collect(vec![&b"data: \xE4"[..], &b"\xBD\xA0\n\n"[..]]).await;
        assert_eq!(units, vec![SseUnit::event("你")]);
    }

    #[tokio::test]
    async fn test_retry_field_becomes_reconnect_interval() {
        let units = collect(vec![&b"retry: 3000\ndata: x\n\n"[..]]).await;
        assert_eq!(
            units,
            vec![
                SseUnit::ReconnectInterval(Duration::from_millis(3000)),
                SseUnit::event("x"),
            ]
        );
    }

    #[tokio::test]
    async fn test_comments_are_skipped() {
        let units = collect(vec![&b": keep-alive\n\ndata: x\n\n"[..]]).await;
        assert_eq!(units, vec![SseUnit::event("x")]);
    }

    #[tokio::test]
    async fn test_transport_error_is_passed_through() {
        let failing: ByteStream = Box::pin(stream::iter(vec![
            Ok(Bytes::from_static(&b"data: a\n\n"[..])),
            Err(DomainError::provider("http", "connection reset")),
        ]));

        let units: Vec<_> = sse_units(failing).collect().await;
        assert!(matches!(units[0], Ok(SseUnit::Event { ref data }) if data == "a"));
        assert!(matches!(units[1], Err(DomainError::Provider { .. })));
    }
}
