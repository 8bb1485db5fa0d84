// src/api/http/personas.rs
// The five persona CRUD handlers. Each is one store call plus the status
// code; all failure mapping lives in ApiError.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::api::error::ApiResult;
use crate::persona::types::{CreatePersonaRequest, UpdatePersonaRequest};
use crate::state::AppState;

/// POST /personas
pub async fn create_persona(
    State(app): State<Arc<AppState>>,
    Json(payload): Json<CreatePersonaRequest>,
) -> ApiResult<impl IntoResponse> {
    let persona = app.persona_store.create(payload).await?;
    Ok((StatusCode::CREATED, Json(persona)))
}

/// GET /personas
pub async fn list_personas(State(app): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let personas = app.persona_store.list().await?;
    Ok(Json(personas))
}

/// GET /personas/{id}
pub async fn get_persona(
    State(app): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let persona = app.persona_store.get(id).await?;
    Ok(Json(persona))
}

/// PUT/PATCH /personas/{id}
pub async fn update_persona(
    State(app): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePersonaRequest>,
) -> ApiResult<impl IntoResponse> {
    let persona = app.persona_store.update(id, payload).await?;
    Ok(Json(persona))
}

/// DELETE /personas/{id}
pub async fn delete_persona(
    State(app): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    app.persona_store.delete(id).await?;
    Ok(Json(json!({ "message": "deleted" })))
}
