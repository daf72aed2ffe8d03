use serde::{Deserialize, Serialize};

use crate::domain::ChatMessage;

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub messages: Vec<ChatMessage>,
}
