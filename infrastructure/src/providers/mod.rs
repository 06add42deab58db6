//! Gateway adapters for model providers

mod ollama;

pub use ollama::OllamaGateway;
