//! Run Council use case
//!
//! Orchestrates the full council flow: generation, pooled scoring, audit
//! correction, and aggregation. Phases run strictly in order; the
//! corrector and aggregator only start after every scoring attempt
//! (including timeouts) has resolved.

use crate::config::ScoringParams;
use crate::ports::agent_gateway::AgentGateway;
use crate::ports::context_provider::{ContextError, ContextProvider, NoContext};
use crate::ports::event_logger::{CouncilEvent, CouncilEventLogger, NullEventLogger};
use crate::ports::progress::{CouncilProgress, NoProgress};
use crate::use_cases::audit::audit_matrix;
use crate::use_cases::generate::{GenerationError, generate_responses};
use crate::use_cases::scoring::{attempt_count, score_responses};
use council_domain::{
    CouncilOutcome, DomainError, Panel, Phase, Query, RubricWeights, consensus,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can surface from a council run
#[derive(Error, Debug)]
pub enum RunCouncilError {
    #[error("Configuration error: {0}")]
    Config(#[source] DomainError),

    #[error("Context retrieval failed: {0}")]
    Context(#[from] ContextError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("No consensus: every score was dropped or unparseable")]
    NoConsensus,
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    /// The query to arbitrate
    pub query: Query,
    /// The ordered panel for this run
    pub panel: Panel,
}

impl RunCouncilInput {
    pub fn new(query: impl Into<Query>, panel: Panel) -> Self {
        Self {
            query: query.into(),
            panel,
        }
    }
}

/// Use case for running a full council arbitration
pub struct RunCouncilUseCase<G: AgentGateway + 'static> {
    gateway: Arc<G>,
    context: Arc<dyn ContextProvider>,
    events: Arc<dyn CouncilEventLogger>,
    weights: RubricWeights,
    params: ScoringParams,
}

impl<G: AgentGateway + 'static> RunCouncilUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            context: Arc::new(NoContext),
            events: Arc::new(NullEventLogger),
            weights: RubricWeights::default(),
            params: ScoringParams::default(),
        }
    }

    pub fn with_context(mut self, context: Arc<dyn ContextProvider>) -> Self {
        self.context = context;
        self
    }

    pub fn with_event_logger(mut self, events: Arc<dyn CouncilEventLogger>) -> Self {
        self.events = events;
        self
    }

    pub fn with_weights(mut self, weights: RubricWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_params(mut self, params: ScoringParams) -> Self {
        self.params = params;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunCouncilInput) -> Result<CouncilOutcome, RunCouncilError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunCouncilInput,
        progress: &dyn CouncilProgress,
    ) -> Result<CouncilOutcome, RunCouncilError> {
        // Fail fast on configuration before any agent is invoked
        self.weights.validate().map_err(RunCouncilError::Config)?;
        input.panel.validate().map_err(RunCouncilError::Config)?;

        info!(
            "Starting council with {} panel members",
            input.panel.len()
        );

        let context = self.context.retrieve(input.query.content()).await?;
        info!("Retrieved {} context passages", context.len());

        // Phase 1: Generation (sequential, fail-fast)
        let expert_count = input.panel.indexed_experts().count();
        progress.on_phase_start(&Phase::Generation, expert_count);
        let generation = generate_responses(
            self.gateway.as_ref(),
            &input.panel,
            input.query.content(),
            &context,
            progress,
        )
        .await?;
        progress.on_phase_complete(&Phase::Generation);

        // Phase 2: Scoring (pooled, partial-failure tolerant)
        let total = attempt_count(&input.panel, &generation.responses, &self.params);
        progress.on_phase_start(&Phase::Scoring, total);
        let mut matrix = score_responses(
            Arc::clone(&self.gateway),
            &input.panel,
            &generation.responses,
            &generation.resolved_prompt,
            self.weights,
            &self.params,
            progress,
            self.events.as_ref(),
        )
        .await;
        progress.on_phase_complete(&Phase::Scoring);

        // Phase 3: Audit (single evaluator call; failure means uncorrected)
        let Some(evaluator) = input.panel.evaluator() else {
            return Err(RunCouncilError::Config(DomainError::MissingEvaluator));
        };
        progress.on_phase_start(&Phase::Audit, 1);
        let audit = match audit_matrix(
            self.gateway.as_ref(),
            evaluator,
            input.query.content(),
            &generation.responses,
            &matrix,
        )
        .await
        {
            Ok(report) => {
                progress.on_task_complete(&Phase::Audit, &evaluator.name, true);
                matrix.apply_audit(&report);
                self.events.log(CouncilEvent::new(
                    "audit_applied",
                    json!({
                        "audit_id": report.audit_id,
                        "flags": report.flags.len(),
                        "normalized": report.normalization.keys().collect::<Vec<_>>(),
                        "dropped": report.drops,
                    }),
                ));
                Some(report)
            }
            Err(e) => {
                warn!("Audit unusable, aggregating uncorrected matrix: {}", e);
                progress.on_task_complete(&Phase::Audit, &evaluator.name, false);
                self.events.log(CouncilEvent::new(
                    "audit_skipped",
                    json!({ "reason": e.to_string() }),
                ));
                None
            }
        };
        progress.on_phase_complete(&Phase::Audit);

        // Phase 4: Aggregation (deterministic)
        progress.on_phase_start(&Phase::Aggregation, 1);
        let result = consensus::aggregate(&matrix).map_err(|_| RunCouncilError::NoConsensus)?;
        progress.on_phase_complete(&Phase::Aggregation);

        info!(
            "Council selected {} (average {:.3})",
            result.winner, result.averages[&result.winner]
        );

        Ok(CouncilOutcome {
            query: input.query.into_content(),
            panel: input
                .panel
                .members()
                .iter()
                .map(|m| m.name.clone())
                .collect(),
            responses: generation.responses,
            matrix,
            audit,
            averages: result.averages,
            winner: result.winner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::agent_gateway::GatewayError;
    use async_trait::async_trait;
    use council_domain::{PanelMember, ResponseId};

    const GOOD_SCORE: &str = r#"{"scores": {"accuracy": 4, "completeness": 4, "grounding": 4,
        "reasoning": 4, "clarity": 4}, "confidence_estimate": 0.9, "justification": "solid"}"#;
    const HIGH_SCORE: &str = r#"{"scores": {"accuracy": 5, "completeness": 5, "grounding": 5,
        "reasoning": 5, "clarity": 5}, "confidence_estimate": 0.9, "justification": "excellent"}"#;

    /// Gateway that distinguishes pipeline stages by prompt shape, the way
    /// a live model would see them
    struct StageGateway {
        audit_output: &'static str,
    }

    impl StageGateway {
        fn new() -> Self {
            Self {
                audit_output: r#"{"audit_id": "auditor_run_7", "flags": [], "normalization": {}, "drops": [], "explanation": "clean"}"#,
            }
        }

        fn with_audit(audit_output: &'static str) -> Self {
            Self { audit_output }
        }
    }

    #[async_trait]
    impl AgentGateway for StageGateway {
        async fn invoke(
            &self,
            member: &PanelMember,
            prompt: &str,
        ) -> Result<String, GatewayError> {
            if prompt.contains("independent auditor") {
                return Ok(self.audit_output.to_string());
            }
            if prompt.contains("CANDIDATE RESPONSE") {
                // First expert is generous, the rest are moderate
                return Ok(if member.id == "expert_1" {
                    HIGH_SCORE.to_string()
                } else {
                    GOOD_SCORE.to_string()
                });
            }
            Ok(format!("answer from {}", member.id))
        }
    }

    fn mid_evaluator_panel() -> Panel {
        Panel::new(vec![
            PanelMember::expert("expert_1", "model-a"),
            PanelMember::evaluator("evaluator", "model-b"),
            PanelMember::expert("expert_2", "model-c"),
        ])
    }

    #[tokio::test]
    async fn test_full_run_selects_a_winner() {
        let use_case = RunCouncilUseCase::new(Arc::new(StageGateway::new()));
        let outcome = use_case
            .execute(RunCouncilInput::new("what is consensus?", mid_evaluator_panel()))
            .await
            .unwrap();

        // Non-contiguous ids from the evaluator-in-the-middle panel
        let ids: Vec<String> = outcome
            .responses
            .iter()
            .map(|r| r.response_id.to_string())
            .collect();
        assert_eq!(ids, vec!["r_0", "r_2"]);

        // Both candidates scored by both experts: 4.5 each, tie -> r_0
        assert_eq!(outcome.winner, ResponseId::from_panel_index(0));
        assert!(outcome.was_audited());
        assert_eq!(outcome.winning_response().unwrap().model_id, "expert_1");
    }

    #[tokio::test]
    async fn test_unparseable_audit_means_uncorrected_run() {
        let gateway = StageGateway::with_audit("I could not form an opinion.");
        let use_case = RunCouncilUseCase::new(Arc::new(gateway));
        let outcome = use_case
            .execute(RunCouncilInput::new("q", mid_evaluator_panel()))
            .await
            .unwrap();

        // Run still completes, just without corrections
        assert!(outcome.audit.is_none());
        assert_eq!(outcome.averages.len(), 2);
    }

    #[tokio::test]
    async fn test_audit_drop_can_empty_the_matrix() {
        let gateway = StageGateway::with_audit(
            r#"{"audit_id": "auditor_run_9", "drops": ["expert_1", "expert_2"],
                "explanation": "both scorers colluding"}"#,
        );
        let use_case = RunCouncilUseCase::new(Arc::new(gateway));
        let err = use_case
            .execute(RunCouncilInput::new("q", mid_evaluator_panel()))
            .await
            .unwrap_err();

        assert!(matches!(err, RunCouncilError::NoConsensus));
    }

    #[tokio::test]
    async fn test_audit_normalization_changes_winner() {
        // Normalize the generous scorer and drop the other: only
        // expert_1's halved row survives aggregation.
        let gateway = StageGateway::with_audit(
            r#"{"audit_id": "auditor_run_3",
                "flags": [{"scorer_id": "expert_1", "issue": "uniformly extreme totals", "severity": "high"}],
                "normalization": {"expert_1": 0.5},
                "drops": ["expert_2"],
                "explanation": "extreme scorer correction"}"#,
        );
        let use_case = RunCouncilUseCase::new(Arc::new(gateway));
        let outcome = use_case
            .execute(RunCouncilInput::new("q", mid_evaluator_panel()))
            .await
            .unwrap();

        // Only expert_1 survives, normalized: 5.0 * 0.5 = 2.5 everywhere
        for avg in outcome.averages.values() {
            assert!((avg - 2.5).abs() < 1e-9);
        }
        assert_eq!(outcome.winner, ResponseId::from_panel_index(0));
    }

    #[tokio::test]
    async fn test_invalid_weights_fail_before_any_call() {
        let weights = RubricWeights {
            accuracy: 0.9,
            ..RubricWeights::default()
        };
        let use_case = RunCouncilUseCase::new(Arc::new(StageGateway::new())).with_weights(weights);
        let err = use_case
            .execute(RunCouncilInput::new("q", mid_evaluator_panel()))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RunCouncilError::Config(DomainError::InvalidWeights { .. })
        ));
    }

    #[tokio::test]
    async fn test_panel_without_evaluator_is_config_error() {
        let panel = Panel::new(vec![PanelMember::expert("expert_1", "model-a")]);
        let use_case = RunCouncilUseCase::new(Arc::new(StageGateway::new()));
        let err = use_case
            .execute(RunCouncilInput::new("q", panel))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RunCouncilError::Config(DomainError::MissingEvaluator)
        ));
    }
}
