use std::time::Duration;

use crate::domain::DomainError;
use crate::domain::llm::CompletionChunk;

/// Data payload that ends a completion stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// One decoded unit of an event stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseUnit {
    Event { data: String },
    ReconnectInterval(Duration),
}

impl SseUnit {
    pub fn event(data: impl Into<String>) -> Self {
        Self::Event { data: data.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    AwaitingEvent,
    Emitting,
    Closed,
    Errored,
}

impl DecoderState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Errored)
    }
}

/// What the consumer of the decoder should do after one transition
#[derive(Debug)]
pub enum DecodeStep {
    /// Append this text to the output
    Emit(String),
    /// Nothing to output for this unit
    Skip,
    /// The stream finished successfully
    Close,
    /// The stream failed; nothing else may be emitted
    Fail(DomainError),
}

/// Turns event-stream units into completion text.
///
/// Each call to [`DeltaDecoder::transition`] consumes exactly one unit. Once the
/// decoder reaches `Closed` or `Errored` every further unit is skipped.
#[derive(Debug)]
pub struct DeltaDecoder {
    state: DecoderState,
}

impl DeltaDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::AwaitingEvent,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn transition(&mut self, unit: SseUnit) -> DecodeStep {
        if self.state.is_terminal() {
            return DecodeStep::Skip;
        }

        let data = match unit {
            SseUnit::ReconnectInterval(_) => return DecodeStep::Skip,
            SseUnit::Event { data } => data,
        };

        if data == DONE_SENTINEL {
            self.state = DecoderState::Closed;
            return DecodeStep::Close;
        }

        match serde_json::from_str::<CompletionChunk>(&data) {
            Ok(chunk) => {
                let text = chunk.first_delta_text();
                if text.is_empty() {
                    self.state = DecoderState::AwaitingEvent;
                    DecodeStep::Skip
                } else {
                    self.state = DecoderState::Emitting;
                    DecodeStep::Emit(text.to_string())
                }
            }
            Err(e) => {
                self.state = DecoderState::Errored;
                DecodeStep::Fail(DomainError::stream_decode(format!(
                    "Invalid completion chunk: {}",
                    e
                )))
            }
        }
    }

    /// Record that the upstream body ended.
    ///
    /// Returns `true` when the stream ended without a `[DONE]` sentinel; that
    /// case still counts as a successful close.
    pub fn finish(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = DecoderState::Closed;
        true
    }

    /// Force the decoder into the failed state, e.g. on a transport error
    pub fn fail(&mut self) {
        self.state = DecoderState::Errored;
    }
}

impl Default for DeltaDecoder {
    fn default() -> Self {
        Self::new()
    }
}
