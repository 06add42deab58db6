//! Prompt templates for each council stage

use crate::context::Passage;
use crate::council::value_objects::CandidateResponse;
use crate::rubric::ScoringMatrix;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt for retrieval-grounded expert generation
    ///
    /// Experts answer strictly from the provided context snippets and must
    /// say "Not in context." rather than guess.
    pub fn expert_generation(query: &str, context: &[Passage]) -> String {
        let mut snippets = String::new();
        if context.is_empty() {
            snippets.push_str("(no context retrieved)\n");
        } else {
            for (i, passage) in context.iter().enumerate() {
                snippets.push_str(&format!(
                    "[{}] ({} {})\n{}\n\n",
                    i + 1,
                    passage.source,
                    passage.locator,
                    passage.content
                ));
            }
        }

        format!(
            r#"SYSTEM:
You are a retrieval-grounded assistant. Use only the information in the CONTEXT.
If the answer is not in the context, say: "Not in context."
Do not guess or invent facts.

FORMAT:
1. Final answer (1-2 lines)
2. Brief reasoning (1-2 lines)
3. Snippets used (# or "none")

USER:
{}

CONTEXT:
{}
RULES:
- Base all statements strictly on the context.
- Cite snippet numbers when used.
- Keep responses short and precise."#,
            query, snippets
        )
    }

    /// Prompt for rubric scoring of one candidate response
    pub fn scoring(query: &str, candidate: &str) -> String {
        format!(
            r#"SYSTEM: You are an impartial evaluator that scores candidate answers to a user prompt. Use the rubric provided and be objective.
Return only the JSON object described below and nothing else.

USER: Here is the ORIGINAL USER PROMPT:
{}

Here is the CANDIDATE RESPONSE you must evaluate:
{}

RUBRIC (score each 1-5; 5 = best):
- accuracy: Is the content factually correct given known, verifiable facts? (1 = many factual errors or hallucinations; 5 = fully accurate)
- completeness: Does it address all parts of the prompt? (1 = misses core parts; 5 = full coverage)
- grounding: Does the response cite or reference verifiable sources or show evidence/reasoning that can be checked? (1 = unsupported claims; 5 = well-grounded)
- reasoning: Are the logical steps coherent and correct? (1 = flawed reasoning; 5 = sound stepwise logic)
- clarity: Is it readable, appropriately toned, and well-structured? (1 = confusing; 5 = clear & concise)

Also provide a one-sentence justification for the total score and a confidence estimate between 0 and 1.

Return JSON only with these fields:
{{
  "scores": {{
    "accuracy": int,
    "completeness": int,
    "grounding": int,
    "reasoning": int,
    "clarity": int
  }},
  "confidence_estimate": float,
  "justification": "one-sentence justification"
}}

Notes:
- Score numerically and be conservative: penalize minor hallucinations or unsupported numeric claims.
- Do not refer to model names, internals, or policies in your justification.
Constraints:
- Output must be strictly valid JSON (use "null" for missing, numbers must be numeric).
- Do not include trailing commas.
- Do not include comments or explanatory text."#,
            query, candidate
        )
    }

    /// Prompt for the audit pass over the full scoring matrix
    pub fn auditor(query: &str, responses: &[CandidateResponse], matrix: &ScoringMatrix) -> String {
        let responses_json =
            serde_json::to_string_pretty(responses).unwrap_or_else(|_| "[]".to_string());
        let matrix_json = serde_json::to_string_pretty(matrix).unwrap_or_else(|_| "{}".to_string());

        format!(
            r#"SYSTEM: You are an independent auditor whose job is to inspect a scoring matrix produced by peer models and detect bias, collusion, or anomalous scoring patterns. Return only the JSON described below.

USER: We provide:
1) original_prompt: {}
2) responses: a JSON list of response objects:
{}
3) scoring_matrix: a JSON object where keys are scorer_ids and values are dictionaries mapping response_id -> score_obj
e.g., {}

Task:
1) Inspect scoring patterns for the following anomalies:
- Self-scoring or allowed self-favoring (scorer giving systematically higher scores to a single partner)
- Collusion: two or more scorers consistently upvoting each other across many prompts (pattern detection)
- Extreme scorers: scorer that always gives very high (>=4.5) or very low (<=1.5) totals while variance is near zero
- Outliers: scorer scores that deviate > 2 std from the mean for a response

2) For each detected anomaly produce a corrective action:
- normalization factor for that scorer (multiply all their scores by that factor)
- or flag for human review (if severe)
- or drop scorer from aggregation for this prompt

Return JSON **only**:
{{
  "audit_id": "auditor_run_<id>",
  "flags": [
    {{"scorer_id": "expert_2", "issue": "consistent mutual upvoting with expert_3", "severity": "medium"}}
  ],
  "normalization": {{
    "expert_1": 1.0,
    "expert_2": 0.7
  }},
  "drops": ["scorer_id_to_drop_if_any"],
  "explanation": "one-paragraph summary of why adjustments were made"
}}"#,
            query, responses_json, matrix_json
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::value_objects::ResponseId;

    #[test]
    fn test_expert_generation_includes_snippets() {
        let context = vec![Passage::new(
            "Forward points reflect interest rate differentials.",
            "fx_notes.md",
            "para 3",
        )];
        let prompt = PromptTemplate::expert_generation("What drives forward points?", &context);
        assert!(prompt.contains("What drives forward points?"));
        assert!(prompt.contains("[1] (fx_notes.md para 3)"));
        assert!(prompt.contains("Not in context."));
    }

    #[test]
    fn test_expert_generation_without_context() {
        let prompt = PromptTemplate::expert_generation("Anything?", &[]);
        assert!(prompt.contains("(no context retrieved)"));
    }

    #[test]
    fn test_scoring_prompt_embeds_candidate() {
        let prompt = PromptTemplate::scoring("the query", "the candidate answer");
        assert!(prompt.contains("the query"));
        assert!(prompt.contains("the candidate answer"));
        assert!(prompt.contains("\"confidence_estimate\": float"));
    }

    #[test]
    fn test_auditor_prompt_serializes_matrix_as_data() {
        let responses = vec![CandidateResponse::new(
            ResponseId::from_panel_index(0),
            "expert_1",
            "some answer",
        )];
        let matrix = ScoringMatrix::new();
        let prompt = PromptTemplate::auditor("q", &responses, &matrix);
        assert!(prompt.contains("\"response_id\": \"r_0\""));
        assert!(prompt.contains("drops"));
    }
}
