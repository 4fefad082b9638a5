//! User account entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{DepartmentId, LecturerId, Money, Role, UserId};

/// A user account in one of the four workflow roles
///
/// `department_id` and `hourly_rate` are only meaningful while the role is
/// Lecturer; they are cleared when the role changes away. `lecturer_id` is
/// maintained by the pairing rule: exactly one linked profile for Lecturer
/// accounts, none otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Login name, unique across accounts
    pub username: String,
    /// Workflow role
    pub role: Role,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Department, lecturer accounts only
    pub department_id: Option<DepartmentId>,
    /// Hourly rate, lecturer accounts only
    pub hourly_rate: Option<Money>,
    /// Linked lecturer profile, lecturer accounts only
    pub lecturer_id: Option<LecturerId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns the display name ("First Last"), used as the paired
    /// lecturer's profile name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if this account should carry a lecturer profile
    pub fn is_lecturer(&self) -> bool {
        self.role == Role::Lecturer
    }
}

/// Request to create a user account
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    pub role: Role,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Department for lecturer accounts; ignored otherwise
    pub department_id: Option<DepartmentId>,
    /// Hourly rate for lecturer accounts; defaults to the department rate
    pub hourly_rate: Option<Money>,
}

/// Request to edit a user account; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub role: Option<Role>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub hourly_rate: Option<Money>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: Role) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            username: "tnkosi".to_string(),
            role,
            first_name: "Thandi".to_string(),
            last_name: "Nkosi".to_string(),
            email: "tnkosi@example.ac.za".to_string(),
            department_id: None,
            hourly_rate: None,
            lecturer_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_full_name() {
        let user = sample_user(Role::Lecturer);
        assert_eq!(user.full_name(), "Thandi Nkosi");
    }

    #[test]
    fn test_only_lecturer_accounts_carry_profiles() {
        assert!(sample_user(Role::Lecturer).is_lecturer());
        assert!(!sample_user(Role::Hr).is_lecturer());
    }

    #[test]
    fn test_new_user_validation_rejects_bad_email() {
        let request = NewUser {
            username: "tnkosi".to_string(),
            role: Role::Lecturer,
            first_name: "Thandi".to_string(),
            last_name: "Nkosi".to_string(),
            email: "not-an-email".to_string(),
            department_id: None,
            hourly_rate: None,
        };
        assert!(request.validate().is_err());
    }
}
