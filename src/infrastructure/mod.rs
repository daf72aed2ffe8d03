//! Infrastructure layer - Upstream transport, stream relaying and logging

pub mod llm;
pub mod logging;
