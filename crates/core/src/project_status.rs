//! Project lifecycle status.
//!
//! The five values mirror the `project_statuses` lookup table; each variant's
//! discriminant matches the seed order (1-based). Labels are the values shown
//! to users and accepted over the API.
//!
//! There is no transition graph: any status may follow any other, including
//! itself, and no status is terminal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::types::StatusId;

#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    Formulation = 1,
    Evaluation = 2,
    Active = 3,
    Inactive = 4,
    Finished = 5,
}

/// Every status, in seed order.
pub const ALL_STATUSES: [ProjectStatus; 5] = [
    ProjectStatus::Formulation,
    ProjectStatus::Evaluation,
    ProjectStatus::Active,
    ProjectStatus::Inactive,
    ProjectStatus::Finished,
];

impl ProjectStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Resolve a database status ID. Unknown ids are a data error.
    pub fn from_id(id: StatusId) -> Result<Self, CoreError> {
        ALL_STATUSES
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| CoreError::Internal(format!("Unknown project status id {id}")))
    }

    /// Display label stored in history and returned by the API.
    pub fn label(self) -> &'static str {
        match self {
            Self::Formulation => "Formulación",
            Self::Evaluation => "Evaluación",
            Self::Active => "Activo",
            Self::Inactive => "Inactivo",
            Self::Finished => "Finalizado",
        }
    }

    /// Parse a user-supplied label.
    ///
    /// Matching ignores surrounding whitespace, case, and the accents on
    /// `Formulación` / `Evaluación`.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("A new status is required".into()));
        }
        let folded = fold_label(trimmed);
        ALL_STATUSES
            .into_iter()
            .find(|s| fold_label(s.label()) == folded)
            .ok_or_else(|| {
                let valid: Vec<&str> = ALL_STATUSES.iter().map(|s| s.label()).collect();
                CoreError::Validation(format!(
                    "Invalid status '{trimmed}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

fn fold_label(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' => 'u',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ProjectStatus> for StatusId {
    fn from(value: ProjectStatus) -> Self {
        value as StatusId
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
