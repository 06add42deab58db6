//! Panel registry
//!
//! Fixed, ordered collection of panel members. Member order is significant:
//! candidate response identifiers are derived from a member's position in
//! the full panel (evaluator slot included), so the order must not change
//! for the lifetime of a run.

use super::member::{AgentRole, PanelMember};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The ordered council panel (Registry)
///
/// # Example
///
/// ```
/// use council_domain::panel::{AgentRole, Panel, PanelMember};
///
/// let panel = Panel::new(vec![
///     PanelMember::expert("expert_1", "mistral:7b"),
///     PanelMember::evaluator("evaluator", "gemma2:9b"),
/// ]);
/// assert!(panel.validate().is_ok());
/// assert_eq!(panel.members_with_role(AgentRole::Expert).count(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panel {
    members: Vec<PanelMember>,
}

impl Panel {
    /// Create a panel from an ordered member list
    pub fn new(members: Vec<PanelMember>) -> Self {
        Self { members }
    }

    /// The default offline panel: four experts plus one evaluator
    pub fn default_members() -> Vec<PanelMember> {
        vec![
            PanelMember::expert("expert_1", "starling-lm"),
            PanelMember::expert("expert_2", "ministral-3"),
            PanelMember::expert("expert_3", "mistral:7b"),
            PanelMember::expert("expert_4", "phi3:mini"),
            PanelMember::evaluator("evaluator", "gemma2:9b"),
        ]
    }

    /// All members in panel order
    pub fn members(&self) -> &[PanelMember] {
        &self.members
    }

    /// Number of panel members (all roles)
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members with the given role, in panel order
    pub fn members_with_role(&self, role: AgentRole) -> impl Iterator<Item = &PanelMember> {
        self.members.iter().filter(move |m| m.role == role)
    }

    /// Expert members in panel order, with their panel index
    ///
    /// The index is the position in the full panel including the evaluator
    /// slot, which is what response identifiers are derived from.
    pub fn indexed_experts(&self) -> impl Iterator<Item = (usize, &PanelMember)> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.role.is_expert())
    }

    /// The designated evaluator, if present
    pub fn evaluator(&self) -> Option<&PanelMember> {
        self.members.iter().find(|m| m.role.is_evaluator())
    }

    /// Look up a member by its stable identifier
    pub fn member_by_id(&self, id: &str) -> Option<&PanelMember> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Validate panel composition before a run
    ///
    /// Requires at least one expert and exactly one evaluator. Runs must
    /// fail fast here rather than partway through a pipeline.
    pub fn validate(&self) -> Result<(), DomainError> {
        let evaluators = self.members_with_role(AgentRole::Evaluator).count();
        match evaluators {
            0 => return Err(DomainError::MissingEvaluator),
            1 => {}
            _ => return Err(DomainError::MultipleEvaluators),
        }
        if self.members_with_role(AgentRole::Expert).count() == 0 {
            return Err(DomainError::MissingExpert);
        }
        Ok(())
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new(Self::default_members())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_panel() -> Panel {
        Panel::new(vec![
            PanelMember::expert("expert_1", "starling-lm"),
            PanelMember::evaluator("evaluator", "gemma2:9b"),
            PanelMember::expert("expert_2", "mistral:7b"),
        ])
    }

    #[test]
    fn test_validate_ok() {
        assert!(test_panel().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_evaluator() {
        let panel = Panel::new(vec![PanelMember::expert("expert_1", "mistral:7b")]);
        assert!(matches!(
            panel.validate(),
            Err(DomainError::MissingEvaluator)
        ));
    }

    #[test]
    fn test_validate_missing_expert() {
        let panel = Panel::new(vec![PanelMember::evaluator("evaluator", "gemma2:9b")]);
        assert!(matches!(panel.validate(), Err(DomainError::MissingExpert)));
    }

    #[test]
    fn test_validate_multiple_evaluators() {
        let panel = Panel::new(vec![
            PanelMember::expert("expert_1", "mistral:7b"),
            PanelMember::evaluator("evaluator", "gemma2:9b"),
            PanelMember::evaluator("evaluator_2", "phi3:mini"),
        ]);
        assert!(matches!(
            panel.validate(),
            Err(DomainError::MultipleEvaluators)
        ));
    }

    #[test]
    fn test_indexed_experts_keep_panel_positions() {
        // Evaluator in the middle: expert indices are 0 and 2
        let indices: Vec<usize> = test_panel().indexed_experts().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_evaluator_lookup() {
        let panel = test_panel();
        assert_eq!(panel.evaluator().unwrap().id, "evaluator");
        assert_eq!(panel.member_by_id("expert_2").unwrap().name, "mistral:7b");
    }

    #[test]
    fn test_default_panel_is_valid() {
        assert!(Panel::default().validate().is_ok());
    }
}
