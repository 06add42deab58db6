//! Council event logger port
//!
//! Structured run events (phase transitions, skipped scoring attempts,
//! audit results) flow through this port so non-fatal conditions are
//! observable without halting the pipeline. Adapters decide the sink;
//! the infrastructure layer ships a JSONL file writer.

use serde_json::Value;

/// One structured run event
#[derive(Debug, Clone)]
pub struct CouncilEvent {
    /// Event discriminator, e.g. "score_skipped"
    pub event_type: String,
    /// Arbitrary JSON payload
    pub payload: Value,
}

impl CouncilEvent {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }
}

/// Sink for council run events
pub trait CouncilEventLogger: Send + Sync {
    /// Record one event. Must not block the pipeline on failure.
    fn log(&self, event: CouncilEvent);
}

/// Logger that discards all events
pub struct NullEventLogger;

impl CouncilEventLogger for NullEventLogger {
    fn log(&self, _event: CouncilEvent) {}
}
