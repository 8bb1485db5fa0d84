// src/state.rs

use std::sync::Arc;

use crate::llm::ChatClient;
use crate::persona::PersonaStore;

/// Everything a handler needs, constructed once in main and shared through
/// the router. No ambient globals anywhere else.
#[derive(Clone)]
pub struct AppState {
    pub persona_store: Arc<PersonaStore>,
    pub chat_client: Arc<dyn ChatClient>,
}

impl AppState {
    pub fn new(persona_store: Arc<PersonaStore>, chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            persona_store,
            chat_client,
        }
    }
}
