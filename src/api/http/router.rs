// src/api/http/router.rs
// HTTP router composition for the REST API endpoints

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use super::{
    handlers::health_handler,
    personas::{create_persona, delete_persona, get_persona, list_personas, update_persona},
    prompt::persona_prompt,
};
use crate::state::AppState;

/// Main HTTP router: health, persona CRUD, and the prompt relay.
pub fn http_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(health_handler))
        // Persona CRUD
        .route("/personas", post(create_persona).get(list_personas))
        .route(
            "/personas/{id}",
            get(get_persona)
                .put(update_persona)
                .patch(update_persona)
                .delete(delete_persona),
        )
        // Prompt relay
        .route("/personas/{id}/prompt", post(persona_prompt))
        .with_state(app_state)
}
