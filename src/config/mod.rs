// src/config/mod.rs
// All runtime settings come from the environment (with .env support).
// Loaded once in main and passed down; nothing here is a global.

use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    // ── Server Configuration
    pub host: String,
    pub port: u16,

    // ── Database Configuration
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── OpenAI Configuration
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub max_completion_tokens: u32,
    pub openai_timeout: u64,
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => match val.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        // .env is optional; plain environment variables win either way.
        let _ = dotenvy::dotenv();

        Self {
            host: env_var_or("PERSONA_HOST", "0.0.0.0".to_string()),
            port: env_var_or("PERSONA_PORT", 5005),
            database_url: env_var_or("DATABASE_URL", "sqlite:./personas.db".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 5),
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            openai_base_url: env_var_or("OPENAI_BASE_URL", "https://api.openai.com".to_string()),
            openai_model: env_var_or("PERSONA_MODEL", "gpt-5-mini".to_string()),
            max_completion_tokens: env_var_or("PERSONA_MAX_COMPLETION_TOKENS", 2000),
            openai_timeout: env_var_or("PERSONA_OPENAI_TIMEOUT", 30),
        }
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get full OpenAI API URL for a given endpoint
    pub fn openai_api_url(&self, endpoint: &str) -> String {
        format!("{}/v1/{}", self.openai_base_url, endpoint)
    }
}
