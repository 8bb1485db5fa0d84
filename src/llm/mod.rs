// src/llm/mod.rs

pub mod client;

pub use client::{ChatClient, OpenAiClient};
