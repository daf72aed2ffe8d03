//! Domain layer - Core types and the stream decoding state machine

pub mod error;
pub mod llm;
pub mod stream;

pub use error::DomainError;
pub use llm::{ChatMessage, CompletionChunk, MessageRole, ProviderConfig, ProviderKind};
pub use stream::{DecodeStep, DecoderState, DeltaDecoder, SseUnit};
