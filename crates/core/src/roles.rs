//! Well-known role names.
//!
//! These must match the `CHECK` constraint on `users.role`.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_COORDINATOR: &str = "coordinador";
pub const ROLE_TEACHER: &str = "docente";
pub const ROLE_STUDENT: &str = "estudiante";

pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_COORDINATOR, ROLE_TEACHER, ROLE_STUDENT];

/// Role given to self-registered accounts.
pub const DEFAULT_ROLE: &str = ROLE_STUDENT;

pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}
