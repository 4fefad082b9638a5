//! Lecturer profile entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{DepartmentId, LecturerId, Money, UserId};

/// A lecturer profile
///
/// The hourly rate mirrors the department rate through the cascade unless
/// HR overrides it independently. `user_id` links back to the account that
/// owns this profile (see the pairing rule in [`crate::services`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
    /// Unique identifier
    pub id: LecturerId,
    /// Display name ("First Last")
    pub name: String,
    /// Department the lecturer belongs to, if assigned
    pub department_id: Option<DepartmentId>,
    /// Hourly rate used for claim snapshots
    pub hourly_rate: Money,
    /// Linked user account, if any
    pub user_id: Option<UserId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Lecturer {
    /// Creates a new lecturer profile
    pub fn new(name: impl Into<String>, hourly_rate: Money) -> Self {
        let now = Utc::now();
        Self {
            id: LecturerId::new_v7(),
            name: name.into(),
            department_id: None,
            hourly_rate,
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Assigns the lecturer to a department
    pub fn with_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Links the lecturer to a user account
    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Returns true if the lecturer can submit claims
    ///
    /// Submission requires a department assignment; the rate snapshot and
    /// department name on a claim come from here.
    pub fn can_submit_claims(&self) -> bool {
        self.department_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lecturer_without_department_cannot_submit() {
        let lecturer = Lecturer::new("Thandi Nkosi", Money::new(dec!(350), Currency::ZAR));
        assert!(!lecturer.can_submit_claims());
    }

    #[test]
    fn test_lecturer_with_department_can_submit() {
        let lecturer = Lecturer::new("Thandi Nkosi", Money::new(dec!(350), Currency::ZAR))
            .with_department(DepartmentId::new());
        assert!(lecturer.can_submit_claims());
    }
}
