//! Context provider port
//!
//! The council consumes already-retrieved context passages. This port is
//! the whole contract: given a query, return a finite ordered list of
//! opaque passages. Retrieval mechanics (vector stores, embeddings) stay
//! behind the adapter.

use async_trait::async_trait;
use council_domain::Passage;
use thiserror::Error;

/// Errors that can occur during context retrieval
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Context source unavailable: {0}")]
    Unavailable(String),

    #[error("Retrieval failed: {0}")]
    RetrievalFailed(String),
}

/// Provider of retrieved context passages
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Retrieve context passages relevant to the query
    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>, ContextError>;
}

/// Provider that returns no context (ungrounded runs)
pub struct NoContext;

#[async_trait]
impl ContextProvider for NoContext {
    async fn retrieve(&self, _query: &str) -> Result<Vec<Passage>, ContextError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_context_is_empty() {
        let passages = NoContext.retrieve("anything").await.unwrap();
        assert!(passages.is_empty());
    }
}
