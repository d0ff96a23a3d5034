//! Provider-specific HTTP clients.

pub mod ollama_service;
pub mod open_ai_service;
