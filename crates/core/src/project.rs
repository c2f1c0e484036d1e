//! Project registration rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::require_text;

/// One student on a project team. Order in the team list is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub identification: String,
    #[serde(default)]
    pub grade: String,
}

/// Check a project title and its team before saving.
///
/// Names are required for each member; identification and grade are not.
/// Duplicate members are allowed.
pub fn validate_project(title: &str, members: &[TeamMember]) -> Result<(), CoreError> {
    require_text("title", title)?;
    validate_members(members)
}

/// Every member needs a first and last name.
pub fn validate_members(members: &[TeamMember]) -> Result<(), CoreError> {
    for (index, member) in members.iter().enumerate() {
        if member.first_name.trim().is_empty() || member.last_name.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Team member #{} needs a first and last name",
                index + 1
            )));
        }
    }
    Ok(())
}

/// Budgets cannot be negative.
pub fn validate_budget(budget: Option<f64>) -> Result<(), CoreError> {
    match budget {
        Some(value) if !value.is_finite() || value < 0.0 => Err(CoreError::Validation(
            "Budget must be a non-negative number".into(),
        )),
        _ => Ok(()),
    }
}
