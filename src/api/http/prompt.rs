// src/api/http/prompt.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::persona::prompt::system_prompt;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PromptRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub ai_response: String,
}

/// POST /personas/{id}/prompt
///
/// Message validation comes before the persona lookup, and both come before
/// the outbound call: a bad request never costs a database read, and a
/// missing persona never costs an upstream round trip.
pub async fn persona_prompt(
    State(app): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<PromptRequest>,
) -> ApiResult<Json<PromptResponse>> {
    let message = payload
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::validation("message field is required in the request body"))?;

    let persona = app.persona_store.get(id).await?;
    let prompt = system_prompt(&persona);
    debug!(%id, "relaying prompt for persona");

    let ai_response = app.chat_client.complete(&prompt, &message).await?;
    Ok(Json(PromptResponse { ai_response }))
}
