//! Panel member value objects

use serde::{Deserialize, Serialize};

/// Role of an agent within the council panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// Produces candidate answers and scores other candidates
    #[default]
    Expert,
    /// Audits the scoring matrix for bias; never generates or scores
    Evaluator,
}

impl AgentRole {
    pub fn is_evaluator(&self) -> bool {
        matches!(self, AgentRole::Evaluator)
    }

    pub fn is_expert(&self) -> bool {
        matches!(self, AgentRole::Expert)
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentRole::Expert => write!(f, "expert"),
            AgentRole::Evaluator => write!(f, "evaluator"),
        }
    }
}

impl std::str::FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expert" => Ok(AgentRole::Expert),
            "evaluator" => Ok(AgentRole::Evaluator),
            other => Err(format!(
                "Unknown agent role: {}. Valid: expert, evaluator",
                other
            )),
        }
    }
}

/// A single agent on the council panel (Value Object)
///
/// The member itself is a pure value; invocation goes through the
/// `AgentGateway` port so domain code never touches a transport.
///
/// # Example
///
/// ```
/// use council_domain::panel::PanelMember;
///
/// let member = PanelMember::expert("expert_1", "mistral:7b");
/// assert!(member.role.is_expert());
/// assert_eq!(member.name, "mistral:7b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelMember {
    /// Stable identifier used as scorer key in the matrix (e.g. "expert_1")
    pub id: String,
    /// Display/model name handed to the gateway (e.g. "mistral:7b")
    pub name: String,
    /// Role within the panel
    pub role: AgentRole,
}

impl PanelMember {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: AgentRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    /// Create an expert member
    pub fn expert(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, AgentRole::Expert)
    }

    /// Create an evaluator member
    pub fn evaluator(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, AgentRole::Evaluator)
    }
}

impl std::fmt::Display for PanelMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("expert".parse::<AgentRole>().ok(), Some(AgentRole::Expert));
        assert_eq!(
            "Evaluator".parse::<AgentRole>().ok(),
            Some(AgentRole::Evaluator)
        );
        assert!("moderator".parse::<AgentRole>().is_err());
    }

    #[test]
    fn test_role_display_roundtrip() {
        for role in [AgentRole::Expert, AgentRole::Evaluator] {
            let parsed: AgentRole = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_member_constructors() {
        let e = PanelMember::expert("expert_2", "starling-lm");
        assert!(e.role.is_expert());

        let a = PanelMember::evaluator("evaluator", "gemma2:9b");
        assert!(a.role.is_evaluator());
        assert_eq!(a.to_string(), "evaluator (gemma2:9b)");
    }
}
