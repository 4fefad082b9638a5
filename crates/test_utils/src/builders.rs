//! Test data builders
//!
//! Builder patterns for constructing test entities with sensible defaults.
//! Tests set only the fields they care about.

use core_kernel::{DepartmentId, LecturerId, Money, Role, UserId};
use domain_claims::{Claim, ClaimSubmission};
use domain_directory::{Department, Lecturer, NewUser};

use crate::fixtures::{MoneyFixtures, StringFixtures};

/// Builder for claims in any lifecycle state
pub struct ClaimBuilder {
    lecturer_id: LecturerId,
    lecturer_name: String,
    department_name: String,
    hourly_rate: Money,
    month: String,
    hours_worked: u32,
    notes: Option<String>,
    verified_by: Option<String>,
    rejected_by_coordinator: Option<String>,
    approved_by: Option<String>,
    rejected_by_manager: Option<String>,
    deleted: bool,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            lecturer_id: LecturerId::new(),
            lecturer_name: StringFixtures::lecturer_name().to_string(),
            department_name: StringFixtures::department().to_string(),
            hourly_rate: MoneyFixtures::standard_rate(),
            month: StringFixtures::month().to_string(),
            hours_worked: 120,
            notes: None,
            verified_by: None,
            rejected_by_coordinator: None,
            approved_by: None,
            rejected_by_manager: None,
            deleted: false,
        }
    }

    /// Sets the owning lecturer
    pub fn with_lecturer(mut self, id: LecturerId, name: impl Into<String>) -> Self {
        self.lecturer_id = id;
        self.lecturer_name = name.into();
        self
    }

    /// Sets the department snapshot
    pub fn with_department(mut self, name: impl Into<String>) -> Self {
        self.department_name = name.into();
        self
    }

    /// Sets the hourly-rate snapshot
    pub fn with_rate(mut self, rate: Money) -> Self {
        self.hourly_rate = rate;
        self
    }

    /// Sets the claimed hours
    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours_worked = hours;
        self
    }

    /// Sets the period label
    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = month.into();
        self
    }

    /// Sets the notes field
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Verifies the claim by the given coordinator
    pub fn verified(mut self, coordinator: impl Into<String>) -> Self {
        self.verified_by = Some(coordinator.into());
        self
    }

    /// Rejects the claim at verification
    pub fn rejected_at_verification(mut self, coordinator: impl Into<String>) -> Self {
        self.rejected_by_coordinator = Some(coordinator.into());
        self
    }

    /// Verifies and approves the claim
    pub fn approved(mut self, coordinator: impl Into<String>, manager: impl Into<String>) -> Self {
        self.verified_by = Some(coordinator.into());
        self.approved_by = Some(manager.into());
        self
    }

    /// Verifies the claim and rejects it at approval
    pub fn rejected_at_approval(
        mut self,
        coordinator: impl Into<String>,
        manager: impl Into<String>,
    ) -> Self {
        self.verified_by = Some(coordinator.into());
        self.rejected_by_manager = Some(manager.into());
        self
    }

    /// Marks the claim soft-deleted
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Builds the claim, walking it through the requested transitions
    pub fn build(self) -> Claim {
        let mut claim = Claim::submit(
            self.lecturer_id,
            self.lecturer_name,
            self.department_name,
            self.hourly_rate,
            ClaimSubmission {
                month: self.month,
                hours_worked: self.hours_worked,
                notes: self.notes,
                document: None,
            },
        )
        .expect("ClaimBuilder produced invalid claim data");

        if let Some(coordinator) = self.rejected_by_coordinator {
            claim
                .reject_verification(&coordinator)
                .expect("reject at verification");
        } else if let Some(coordinator) = self.verified_by {
            claim.verify(&coordinator).expect("verify");
            if let Some(manager) = self.approved_by {
                claim.approve(&manager).expect("approve");
            } else if let Some(manager) = self.rejected_by_manager {
                claim.reject_approval(&manager).expect("reject at approval");
            }
        }

        if self.deleted {
            claim.soft_delete();
        }
        claim
    }
}

/// Builder for departments
pub struct DepartmentBuilder {
    name: String,
    hourly_rate: Money,
}

impl Default for DepartmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DepartmentBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            name: StringFixtures::department().to_string(),
            hourly_rate: MoneyFixtures::standard_rate(),
        }
    }

    /// Sets the department name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the hourly rate
    pub fn with_rate(mut self, rate: Money) -> Self {
        self.hourly_rate = rate;
        self
    }

    /// Builds the department
    pub fn build(self) -> Department {
        Department::new(self.name, self.hourly_rate)
    }
}

/// Builder for lecturer profiles
pub struct LecturerBuilder {
    name: String,
    hourly_rate: Money,
    department_id: Option<DepartmentId>,
    user_id: Option<UserId>,
}

impl Default for LecturerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LecturerBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            name: StringFixtures::lecturer_name().to_string(),
            hourly_rate: MoneyFixtures::standard_rate(),
            department_id: None,
            user_id: None,
        }
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the hourly rate
    pub fn with_rate(mut self, rate: Money) -> Self {
        self.hourly_rate = rate;
        self
    }

    /// Assigns a department
    pub fn with_department(mut self, id: DepartmentId) -> Self {
        self.department_id = Some(id);
        self
    }

    /// Links a user account
    pub fn with_user(mut self, id: UserId) -> Self {
        self.user_id = Some(id);
        self
    }

    /// Builds the lecturer
    pub fn build(self) -> Lecturer {
        let mut lecturer = Lecturer::new(self.name, self.hourly_rate);
        lecturer.department_id = self.department_id;
        lecturer.user_id = self.user_id;
        lecturer
    }
}

/// Builder for user-creation requests
pub struct NewUserBuilder {
    username: String,
    role: Role,
    first_name: String,
    last_name: String,
    email: String,
    department_id: Option<DepartmentId>,
    hourly_rate: Option<Money>,
}

impl Default for NewUserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewUserBuilder {
    /// Creates a builder for a lecturer account with default values
    pub fn new() -> Self {
        Self {
            username: "tnkosi".to_string(),
            role: Role::Lecturer,
            first_name: "Thandi".to_string(),
            last_name: "Nkosi".to_string(),
            email: "tnkosi@example.ac.za".to_string(),
            department_id: None,
            hourly_rate: Some(MoneyFixtures::standard_rate()),
        }
    }

    /// Sets the username (email follows it)
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self.email = format!("{}@example.ac.za", self.username);
        self
    }

    /// Sets the role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Sets the name
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Assigns a department
    pub fn with_department(mut self, id: DepartmentId) -> Self {
        self.department_id = Some(id);
        self
    }

    /// Sets an explicit hourly rate
    pub fn with_rate(mut self, rate: Money) -> Self {
        self.hourly_rate = Some(rate);
        self
    }

    /// Leaves the rate unset so it defaults from the department
    pub fn with_department_rate(mut self) -> Self {
        self.hourly_rate = None;
        self
    }

    /// Builds the request
    pub fn build(self) -> NewUser {
        NewUser {
            username: self.username,
            role: self.role,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            department_id: self.department_id,
            hourly_rate: self.hourly_rate,
        }
    }
}
