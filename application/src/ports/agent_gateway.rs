//! Agent gateway port
//!
//! Defines the interface for invoking panel agents. An invocation is a
//! plain prompt-to-text call. The gateway has no built-in timeout;
//! time-boxing is imposed by the scoring engine, not the agent.

use async_trait::async_trait;
use council_domain::PanelMember;
use thiserror::Error;

/// Errors that can occur during agent invocation
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Gateway for panel agent invocation
///
/// This port defines how the application layer talks to the models behind
/// the panel. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AgentGateway: Send + Sync {
    /// Invoke one panel member with a fully-resolved prompt and return the
    /// raw response text
    async fn invoke(&self, member: &PanelMember, prompt: &str) -> Result<String, GatewayError>;
}
