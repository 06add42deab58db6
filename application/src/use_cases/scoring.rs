//! Concurrent scoring engine
//!
//! Every scorer judges every candidate response through a bounded worker
//! pool, each call individually time-boxed. A failed attempt (timeout,
//! invocation error, unparseable output) leaves the (scorer, response)
//! pair absent from the matrix and the run continues; there are no
//! retries. Workers never touch the matrix: they hand tagged attempt
//! results to the coordinating loop, which is the only writer.

use crate::config::ScoringParams;
use crate::ports::agent_gateway::{AgentGateway, GatewayError};
use crate::ports::event_logger::{CouncilEvent, CouncilEventLogger};
use crate::ports::progress::CouncilProgress;
use council_domain::{
    AgentRole, CandidateResponse, ExtractError, Panel, PanelMember, Phase, PromptTemplate,
    ResponseId, RubricWeights, ScoreRecord, ScoringMatrix,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Outcome of one (scorer, response) scoring attempt
///
/// Timeouts and errors are data, not control flow: a single bad attempt
/// must never unwind the scoring phase.
#[derive(Debug)]
pub enum ScoreAttempt {
    Scored(ScoreRecord),
    TimedOut,
    InvocationFailed(GatewayError),
    Unparseable(ExtractError),
}

impl ScoreAttempt {
    /// Short tag for logs and run events
    fn tag(&self) -> &'static str {
        match self {
            ScoreAttempt::Scored(_) => "scored",
            ScoreAttempt::TimedOut => "timeout",
            ScoreAttempt::InvocationFailed(_) => "invocation_failed",
            ScoreAttempt::Unparseable(_) => "unparseable",
        }
    }
}

/// Score every candidate with every scorer and assemble the sparse matrix.
///
/// Scorers are all panel experts (the evaluator never scores), optionally
/// filtered to a single member via [`ScoringParams::only_scorer`].
/// Submission order follows scorer-then-response nesting; completion order
/// is irrelevant because the matrix is keyed by identity.
pub async fn score_responses<G: AgentGateway + 'static>(
    gateway: Arc<G>,
    panel: &Panel,
    responses: &[CandidateResponse],
    query: &str,
    weights: RubricWeights,
    params: &ScoringParams,
    progress: &dyn CouncilProgress,
    events: &dyn CouncilEventLogger,
) -> ScoringMatrix {
    let scorers: Vec<&PanelMember> = panel
        .members_with_role(AgentRole::Expert)
        .filter(|m| match &params.only_scorer {
            Some(filter) => &m.id == filter || &m.name == filter,
            None => true,
        })
        .collect();

    info!(
        "Scoring {} responses with {} scorers (concurrency {}, timeout {:?})",
        responses.len(),
        scorers.len(),
        params.concurrency,
        params.timeout
    );

    let semaphore = Arc::new(Semaphore::new(params.concurrency.max(1)));
    let mut join_set = JoinSet::new();

    for scorer in &scorers {
        for response in responses {
            let gateway = Arc::clone(&gateway);
            let semaphore = Arc::clone(&semaphore);
            let scorer = (*scorer).clone();
            let response_id = response.response_id;
            let prompt = PromptTemplate::scoring(query, &response.text);
            let timeout = params.timeout;

            join_set.spawn(async move {
                // The permit bounds in-flight invocations; the timeout
                // races only the call itself, not time spent queued.
                let _permit = semaphore.acquire_owned().await.ok();

                let attempt =
                    match tokio::time::timeout(timeout, gateway.invoke(&scorer, &prompt)).await {
                        Err(_) => ScoreAttempt::TimedOut,
                        Ok(Err(e)) => ScoreAttempt::InvocationFailed(e),
                        Ok(Ok(text)) => match ScoreRecord::from_model_output(&text, &weights) {
                            Ok(record) => ScoreAttempt::Scored(record),
                            Err(e) => ScoreAttempt::Unparseable(e),
                        },
                    };

                (scorer.id, response_id, attempt)
            });
        }
    }

    // Single-writer coordination: workers resolve, this loop records.
    let mut matrix = ScoringMatrix::new();

    while let Some(result) = join_set.join_next().await {
        match result {
            Ok((scorer_id, response_id, ScoreAttempt::Scored(record))) => {
                debug!("{} scored {} (total {:.2})", scorer_id, response_id, record.total);
                progress.on_task_complete(&Phase::Scoring, &scorer_id, true);
                matrix.insert(scorer_id, response_id, record);
            }
            Ok((scorer_id, response_id, attempt)) => {
                record_skip(&scorer_id, response_id, &attempt, events);
                progress.on_task_complete(&Phase::Scoring, &scorer_id, false);
            }
            Err(e) => {
                warn!("Scoring task join error: {}", e);
            }
        }
    }

    matrix
}

/// Number of scoring attempts a run will submit
pub fn attempt_count(panel: &Panel, responses: &[CandidateResponse], params: &ScoringParams) -> usize {
    let scorers = panel
        .members_with_role(AgentRole::Expert)
        .filter(|m| match &params.only_scorer {
            Some(filter) => &m.id == filter || &m.name == filter,
            None => true,
        })
        .count();
    scorers * responses.len()
}

fn record_skip(
    scorer_id: &str,
    response_id: ResponseId,
    attempt: &ScoreAttempt,
    events: &dyn CouncilEventLogger,
) {
    let detail = match attempt {
        ScoreAttempt::TimedOut => "call timed out".to_string(),
        ScoreAttempt::InvocationFailed(e) => e.to_string(),
        ScoreAttempt::Unparseable(e) => e.to_string(),
        ScoreAttempt::Scored(_) => return,
    };

    warn!(
        "Skipping ({}, {}): {} - {}",
        scorer_id,
        response_id,
        attempt.tag(),
        detail
    );
    events.log(CouncilEvent::new(
        "score_skipped",
        json!({
            "scorer_id": scorer_id,
            "response_id": response_id.to_string(),
            "reason": attempt.tag(),
            "detail": detail,
        }),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::event_logger::NullEventLogger;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use council_domain::PanelMember;
    use std::time::Duration;

    const GOOD_SCORE: &str = r#"{"scores": {"accuracy": 4, "completeness": 4, "grounding": 4,
        "reasoning": 4, "clarity": 4}, "confidence_estimate": 0.9, "justification": "solid"}"#;

    /// Gateway whose behavior is keyed off the member's model name
    struct ScriptedGateway;

    #[async_trait]
    impl AgentGateway for ScriptedGateway {
        async fn invoke(
            &self,
            member: &PanelMember,
            _prompt: &str,
        ) -> Result<String, GatewayError> {
            match member.name.as_str() {
                "hangs" => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(String::new())
                }
                "errors" => Err(GatewayError::RequestFailed("down".to_string())),
                "rambles" => Ok("I would rather discuss something else.".to_string()),
                _ => Ok(format!("fine. {}", GOOD_SCORE)),
            }
        }
    }

    fn responses(ids: &[usize]) -> Vec<CandidateResponse> {
        ids.iter()
            .map(|&i| {
                CandidateResponse::new(
                    ResponseId::from_panel_index(i),
                    format!("expert_{}", i + 1),
                    "candidate text",
                )
            })
            .collect()
    }

    async fn run(panel: &Panel, params: &ScoringParams) -> ScoringMatrix {
        score_responses(
            Arc::new(ScriptedGateway),
            panel,
            &responses(&[0, 1]),
            "query",
            RubricWeights::default(),
            params,
            &NoProgress,
            &NullEventLogger,
        )
        .await
    }

    #[tokio::test]
    async fn test_full_matrix_on_success() {
        let panel = Panel::new(vec![
            PanelMember::expert("expert_1", "model-a"),
            PanelMember::expert("expert_2", "model-b"),
            PanelMember::evaluator("evaluator", "model-c"),
        ]);

        let matrix = run(&panel, &ScoringParams::default()).await;
        assert_eq!(matrix.entry_count(), 4);
        let record = matrix
            .get("expert_1", ResponseId::from_panel_index(0))
            .unwrap();
        assert!((record.total - 4.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_evaluator_never_scores() {
        let panel = Panel::new(vec![
            PanelMember::expert("expert_1", "model-a"),
            PanelMember::evaluator("evaluator", "model-c"),
        ]);

        let matrix = run(&panel, &ScoringParams::default()).await;
        assert!(matrix.row("evaluator").is_none());
        assert_eq!(matrix.entry_count(), 2);
    }

    #[tokio::test]
    async fn test_timed_out_scorer_contributes_no_rows() {
        let panel = Panel::new(vec![
            PanelMember::expert("expert_1", "model-a"),
            PanelMember::expert("expert_2", "hangs"),
            PanelMember::evaluator("evaluator", "model-c"),
        ]);
        let params = ScoringParams::default().with_timeout(Duration::from_millis(50));

        let matrix = run(&panel, &params).await;
        // Absent entirely, not present with zeros
        assert!(matrix.row("expert_2").is_none());
        assert_eq!(matrix.row("expert_1").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invocation_error_and_garbage_are_absences() {
        let panel = Panel::new(vec![
            PanelMember::expert("expert_1", "errors"),
            PanelMember::expert("expert_2", "rambles"),
            PanelMember::expert("expert_3", "model-a"),
            PanelMember::evaluator("evaluator", "model-c"),
        ]);

        let matrix = run(&panel, &ScoringParams::default()).await;
        assert!(matrix.row("expert_1").is_none());
        assert!(matrix.row("expert_2").is_none());
        assert_eq!(matrix.row("expert_3").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_only_scorer_filter_skips_everyone_else() {
        let panel = Panel::new(vec![
            PanelMember::expert("expert_1", "model-a"),
            PanelMember::expert("expert_2", "model-b"),
            PanelMember::evaluator("evaluator", "model-c"),
        ]);
        let params = ScoringParams::default().with_only_scorer("expert_2");

        let matrix = run(&panel, &params).await;
        assert!(matrix.row("expert_1").is_none());
        assert_eq!(matrix.row("expert_2").unwrap().len(), 2);
        assert_eq!(attempt_count(&panel, &responses(&[0, 1]), &params), 2);
    }

    #[tokio::test]
    async fn test_concurrency_one_still_completes() {
        let panel = Panel::new(vec![
            PanelMember::expert("expert_1", "model-a"),
            PanelMember::expert("expert_2", "model-b"),
            PanelMember::evaluator("evaluator", "model-c"),
        ]);
        let params = ScoringParams::default().with_concurrency(1);

        let matrix = run(&panel, &params).await;
        assert_eq!(matrix.entry_count(), 4);
    }
}
