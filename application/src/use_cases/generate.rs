//! Expert response generation
//!
//! Sequential fan-out over the panel: every expert is invoked once with
//! the query and retrieved context. Generation is deliberately not
//! pooled: an individual agent hang blocks the phase, and any invocation
//! error aborts the run. The council cannot meaningfully proceed with a
//! shrinking expert set mid-generation, so there is no partial-success
//! mode here; scoring is the phase that tolerates partial failure.

use crate::ports::agent_gateway::{AgentGateway, GatewayError};
use crate::ports::progress::CouncilProgress;
use council_domain::{CandidateResponse, Panel, Passage, Phase, PromptTemplate, ResponseId};
use thiserror::Error;
use tracing::{debug, info};

/// An expert invocation failed during fan-out
#[derive(Error, Debug)]
#[error("Expert {agent} failed during generation: {source}")]
pub struct GenerationError {
    /// Id of the failing expert
    pub agent: String,
    #[source]
    pub source: GatewayError,
}

/// Result of the generation phase
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Candidate responses in panel order
    pub responses: Vec<CandidateResponse>,
    /// The fully-resolved generation prompt (query + context), forwarded
    /// to scorers as the prompt under evaluation
    pub resolved_prompt: String,
}

/// Invoke every expert once, in panel order.
///
/// Response ids come from the member's position in the full panel
/// (evaluator slot included), so ids may be non-contiguous.
pub async fn generate_responses<G: AgentGateway + ?Sized>(
    gateway: &G,
    panel: &Panel,
    query: &str,
    context: &[Passage],
    progress: &dyn CouncilProgress,
) -> Result<GenerationOutput, GenerationError> {
    let resolved_prompt = PromptTemplate::expert_generation(query, context);
    let mut responses = Vec::new();

    for (index, member) in panel.indexed_experts() {
        debug!("Generating response from {}", member);
        let text = gateway
            .invoke(member, &resolved_prompt)
            .await
            .map_err(|source| {
                progress.on_task_complete(&Phase::Generation, &member.name, false);
                GenerationError {
                    agent: member.id.clone(),
                    source,
                }
            })?;

        progress.on_task_complete(&Phase::Generation, &member.name, true);
        responses.push(CandidateResponse::new(
            ResponseId::from_panel_index(index),
            member.id.clone(),
            text,
        ));
    }

    info!("Generated {} candidate responses", responses.len());
    Ok(GenerationOutput {
        responses,
        resolved_prompt,
    })
}
