//! Application layer for ai-council
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ScoringParams;
pub use ports::{
    agent_gateway::{AgentGateway, GatewayError},
    context_provider::{ContextError, ContextProvider, NoContext},
    event_logger::{CouncilEvent, CouncilEventLogger, NullEventLogger},
    progress::{CouncilProgress, NoProgress},
};
pub use use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
