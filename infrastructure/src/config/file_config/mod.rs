//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain types via
//! `to_*` methods.

mod context;
mod ollama;
mod panel;
mod scoring;
mod weights;

pub use context::FileContextConfig;
pub use ollama::FileOllamaConfig;
pub use panel::FilePanelMember;
pub use scoring::FileScoringConfig;
pub use weights::FileWeightsConfig;

use council_domain::{Panel, RubricWeights};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
///
/// ```toml
/// [ollama]
/// base_url = "http://localhost:11434"
///
/// [[panel]]
/// name = "mistral:7b"
/// role = "expert"
///
/// [[panel]]
/// name = "gemma2:9b"
/// role = "evaluator"
///
/// [weights]
/// accuracy = 0.35
///
/// [scoring]
/// timeout_secs = 600
/// concurrency = 4
///
/// [context]
/// docs_dir = "docs"
/// max_passages = 4
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Ollama endpoint settings
    pub ollama: FileOllamaConfig,
    /// Ordered panel member tables
    pub panel: Vec<FilePanelMember>,
    /// Rubric weight overrides
    pub weights: FileWeightsConfig,
    /// Scoring engine settings
    pub scoring: FileScoringConfig,
    /// Context retrieval settings
    pub context: FileContextConfig,
}

impl FileConfig {
    /// Build the domain panel from the configured member tables.
    ///
    /// An empty `[[panel]]` list falls back to the default offline panel.
    /// Ids are assigned from the member's role and running count
    /// (`expert_1`, `expert_2`, ..., `evaluator`) unless given explicitly.
    pub fn to_panel(&self) -> Panel {
        if self.panel.is_empty() {
            return Panel::default();
        }

        let mut expert_count = 0usize;
        let mut evaluator_count = 0usize;
        let members = self
            .panel
            .iter()
            .map(|m| m.to_member(&mut expert_count, &mut evaluator_count))
            .collect();
        Panel::new(members)
    }

    /// Build the domain weight table (validation happens at run start)
    pub fn to_weights(&self) -> RubricWeights {
        self.weights.to_weights()
    }
}
