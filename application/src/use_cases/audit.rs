//! Audit step
//!
//! The designated evaluator is invoked exactly once per run with the full
//! query, the full candidate list, and the scoring matrix serialized as
//! data. Its output is parsed through the same lenient extractor as
//! scoring output. Failure here is never fatal: the run-level policy is
//! to proceed on the raw, uncorrected matrix.

use crate::ports::agent_gateway::{AgentGateway, GatewayError};
use council_domain::{AuditReport, CandidateResponse, ExtractError, PanelMember, PromptTemplate, ScoringMatrix};
use thiserror::Error;
use tracing::{debug, info};

/// The audit step could not produce a usable report
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Evaluator invocation failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Evaluator output failed extraction: {0}")]
    Extract(#[from] ExtractError),
}

/// Run the audit pass over a completed scoring matrix.
pub async fn audit_matrix<G: AgentGateway + ?Sized>(
    gateway: &G,
    evaluator: &PanelMember,
    query: &str,
    responses: &[CandidateResponse],
    matrix: &ScoringMatrix,
) -> Result<AuditReport, AuditError> {
    debug!("Auditing matrix with {} entries", matrix.entry_count());

    let prompt = PromptTemplate::auditor(query, responses, matrix);
    let text = gateway.invoke(evaluator, &prompt).await?;
    let report = AuditReport::from_model_output(&text)?;

    info!(
        "Audit {} flagged {} scorers, normalizes {}, drops {}",
        report.audit_id,
        report.flags.len(),
        report.normalization.len(),
        report.drops.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedGateway(&'static str);

    #[async_trait]
    impl AgentGateway for FixedGateway {
        async fn invoke(
            &self,
            _member: &PanelMember,
            _prompt: &str,
        ) -> Result<String, GatewayError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_audit_parses_directive() {
        let output = r#"Audit done.
{"audit_id": "auditor_run_1", "flags": [], "normalization": {"expert_1": 0.8},
 "drops": [], "explanation": "expert_1 runs hot"}"#;
        let report = audit_matrix(
            &FixedGateway(output),
            &PanelMember::evaluator("evaluator", "gemma2:9b"),
            "q",
            &[],
            &ScoringMatrix::new(),
        )
        .await
        .unwrap();
        assert_eq!(report.normalization["expert_1"], 0.8);
    }

    #[tokio::test]
    async fn test_audit_prose_is_extract_error() {
        let err = audit_matrix(
            &FixedGateway("Everything is above board."),
            &PanelMember::evaluator("evaluator", "gemma2:9b"),
            "q",
            &[],
            &ScoringMatrix::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AuditError::Extract(_)));
    }
}
