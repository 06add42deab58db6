//! Panel types for council membership
//!
//! The panel is the fixed, ordered list of agents participating in a
//! council run. Every member is tagged with a role: experts produce and
//! score candidate responses, the single evaluator audits the scoring
//! matrix.

pub mod member;
pub mod registry;

pub use member::{AgentRole, PanelMember};
pub use registry::Panel;
