//! Panel member tables from TOML (`[[panel]]` sections)

use council_domain::{AgentRole, PanelMember};
use serde::{Deserialize, Serialize};

/// One `[[panel]]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePanelMember {
    /// Optional explicit scorer id; derived from the role when absent
    pub id: Option<String>,
    /// Model name handed to the gateway
    pub name: String,
    /// "expert" or "evaluator"; unknown values fall back to expert
    pub role: String,
}

impl FilePanelMember {
    /// Convert into a domain member, assigning a role-derived id when
    /// none is configured. The counters track ids handed out so far.
    pub fn to_member(&self, expert_count: &mut usize, evaluator_count: &mut usize) -> PanelMember {
        let role = self.role.parse::<AgentRole>().unwrap_or_default();
        let id = match (&self.id, role) {
            (Some(id), _) => id.clone(),
            (None, AgentRole::Expert) => {
                *expert_count += 1;
                format!("expert_{}", expert_count)
            }
            (None, AgentRole::Evaluator) => {
                *evaluator_count += 1;
                if *evaluator_count == 1 {
                    "evaluator".to_string()
                } else {
                    format!("evaluator_{}", evaluator_count)
                }
            }
        };
        PanelMember::new(id, self.name.clone(), role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_falls_back_to_expert() {
        let member = FilePanelMember {
            id: None,
            name: "model-x".to_string(),
            role: "moderator".to_string(),
        };
        let (mut e, mut a) = (0, 0);
        let m = member.to_member(&mut e, &mut a);
        assert_eq!(m.role, AgentRole::Expert);
        assert_eq!(m.id, "expert_1");
    }

    #[test]
    fn test_second_evaluator_gets_numbered_id() {
        let member = FilePanelMember {
            id: None,
            name: "model-y".to_string(),
            role: "evaluator".to_string(),
        };
        let (mut e, mut a) = (0, 0);
        assert_eq!(member.to_member(&mut e, &mut a).id, "evaluator");
        assert_eq!(member.to_member(&mut e, &mut a).id, "evaluator_2");
    }
}
