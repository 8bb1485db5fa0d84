// src/llm/client.rs

//! Low-level chat-completions client. No SDK wrappers; just reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::api::error::ApiError;
use crate::config::Config;

/// The relay's only seam to the outside world: one system prompt and one
/// user message in, the reply text out. Exactly one request per call, no
/// retry, no streaming.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, ApiError>;
}

pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    chat_url: String,
    model: String,
    max_completion_tokens: u32,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.openai_timeout))
            .build()?;

        Ok(Self {
            client,
            api_key: config.openai_api_key.clone(),
            chat_url: config.openai_api_url("chat/completions"),
            model: config.openai_model.clone(),
            max_completion_tokens: config.max_completion_tokens,
        })
    }

    fn auth_header(&self, api_key: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {api_key}"))
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, ApiError> {
        // Credential check comes first: a missing key must never turn into
        // network I/O.
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ApiError::MissingCredential("OPENAI_API_KEY"))?;

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_message },
            ],
            "max_completion_tokens": self.max_completion_tokens,
        });

        debug!(model = %self.model, "sending chat completion request");

        let (header_name, header_value) = self.auth_header(api_key);
        let response = self
            .client
            .post(&self.chat_url)
            .header(header_name, header_value)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UpstreamStatus {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ApiError::UpstreamProtocol(format!("invalid JSON body: {e}")))?;

        let reply = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ApiError::UpstreamProtocol("no message content in response".to_string())
            })?;

        Ok(reply.to_string())
    }
}
