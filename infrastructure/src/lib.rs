//! Infrastructure layer for ai-council
//!
//! This crate contains adapters for external systems: configuration
//! files, the Ollama HTTP gateway, the file-based context provider, and
//! the JSONL run logger.

pub mod config;
pub mod context;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use context::FileContextProvider;
pub use logging::JsonlEventLogger;
pub use providers::OllamaGateway;
