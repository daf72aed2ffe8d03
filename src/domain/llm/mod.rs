//! Chat completion domain models

mod chunk;
mod message;
mod provider;

pub use chunk::{ChunkChoice, ChunkDelta, CompletionChunk};
pub use message::{ChatMessage, MessageRole};
pub use provider::{DEFAULT_AZURE_DEPLOYMENT, DEFAULT_MODEL, ProviderConfig, ProviderKind};
