//! Completion relay endpoint handler

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, GenerateRequest};
use crate::infrastructure::llm::{adapt, build_request, build_url};

/// POST /api/generate
///
/// Streams the completion for `messages` back as plain text. When the
/// provider answers with an error status its body is returned unchanged.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let request_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        provider = state.provider.kind.as_str(),
        messages = request.messages.len(),
        "Processing generate request"
    );

    if request.messages.is_empty() {
        return Err(ApiError::bad_request("Messages cannot be empty").with_param("messages"));
    }

    let spec = build_request(&state.provider, &state.api_key, &request.messages);
    let url = build_url(&state.provider, &state.base_url);

    let upstream = state.http_client.send(&url, &spec).await.map_err(|e| {
        error!(request_id = %request_id, error = %e, "Upstream request failed");
        ApiError::from(e)
    })?;

    info!(
        request_id = %request_id,
        status = %upstream.status,
        "Upstream responded"
    );

    Ok(adapt(upstream, state.shutdown.child_token()))
}
