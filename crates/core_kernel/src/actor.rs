//! Actor and role model
//!
//! Every workflow operation receives an explicit [`ActorContext`] describing
//! who is acting, rather than reading identity from ambient session state.
//! The context is minted once at the request boundary (from the validated
//! auth token) and passed down by value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::identifiers::{LecturerId, UserId};

/// The four roles recognised by the claims workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Lecturer,
    Coordinator,
    Manager,
    #[serde(rename = "HR")]
    Hr,
}

impl Role {
    /// Returns the canonical display string for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Lecturer => "Lecturer",
            Role::Coordinator => "Coordinator",
            Role::Manager => "Manager",
            Role::Hr => "HR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lecturer" => Ok(Role::Lecturer),
            "Coordinator" => Ok(Role::Coordinator),
            "Manager" => Ok(Role::Manager),
            "HR" => Ok(Role::Hr),
            other => Err(CoreError::validation(format!("Unknown role: {other}"))),
        }
    }
}

/// The authenticated principal invoking a workflow operation.
///
/// `actor` is the stable identity string stamped into audit fields
/// (the username); `lecturer_id` is present only when the principal has a
/// linked lecturer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    /// Identity stamped into audit fields (username)
    pub actor: String,
    /// User account behind the principal
    pub user_id: UserId,
    /// Role the principal acts under
    pub role: Role,
    /// Linked lecturer profile, if any
    pub lecturer_id: Option<LecturerId>,
}

impl ActorContext {
    /// Creates a context for a lecturer principal
    pub fn lecturer(actor: impl Into<String>, user_id: UserId, lecturer_id: LecturerId) -> Self {
        Self {
            actor: actor.into(),
            user_id,
            role: Role::Lecturer,
            lecturer_id: Some(lecturer_id),
        }
    }

    /// Creates a context for a non-lecturer principal
    pub fn staff(actor: impl Into<String>, user_id: UserId, role: Role) -> Self {
        Self {
            actor: actor.into(),
            user_id,
            role,
            lecturer_id: None,
        }
    }

    /// Returns true if the principal acts under the given role
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Returns true if the principal is the lecturer that owns the given profile
    pub fn owns_lecturer(&self, lecturer_id: LecturerId) -> bool {
        self.lecturer_id == Some(lecturer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Lecturer, Role::Coordinator, Role::Manager, Role::Hr] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_hr_serializes_as_upper_case() {
        let json = serde_json::to_string(&Role::Hr).unwrap();
        assert_eq!(json, "\"HR\"");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!("Dean".parse::<Role>().is_err());
    }

    #[test]
    fn test_lecturer_context_owns_its_profile() {
        let lecturer_id = LecturerId::new();
        let ctx = ActorContext::lecturer("jsmith", UserId::new(), lecturer_id);

        assert!(ctx.has_role(Role::Lecturer));
        assert!(ctx.owns_lecturer(lecturer_id));
        assert!(!ctx.owns_lecturer(LecturerId::new()));
    }

    #[test]
    fn test_staff_context_has_no_lecturer() {
        let ctx = ActorContext::staff("mbrown", UserId::new(), Role::Manager);
        assert!(ctx.lecturer_id.is_none());
    }
}
