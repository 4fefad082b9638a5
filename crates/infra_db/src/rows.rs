//! Database row types and their domain conversions
//!
//! Rows mirror table layouts exactly; statuses, roles, and currencies are
//! stored as canonical text tokens and re-validated when hydrating, so a
//! tampered or corrupt row fails loudly at the boundary instead of flowing
//! into the workflow.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use core_kernel::{Currency, Money, Role};
use domain_claims::{
    Claim, ClaimStatus, CoordinatorStatus, ManagerStatus, SupportingDocument,
};
use domain_directory::{Department, Lecturer, Module, ModuleAssignment, User};

use crate::error::DatabaseError;

pub(crate) fn currency_token(currency: Currency) -> &'static str {
    currency.code()
}

pub(crate) fn parse_currency(token: &str) -> Result<Currency, DatabaseError> {
    match token {
        "ZAR" => Ok(Currency::ZAR),
        "USD" => Ok(Currency::USD),
        "EUR" => Ok(Currency::EUR),
        "GBP" => Ok(Currency::GBP),
        other => Err(DatabaseError::CorruptRow(format!(
            "Unknown currency '{other}'"
        ))),
    }
}

pub(crate) fn coordinator_status_token(status: CoordinatorStatus) -> &'static str {
    match status {
        CoordinatorStatus::Pending => "pending",
        CoordinatorStatus::Approved => "approved",
        CoordinatorStatus::Rejected => "rejected",
    }
}

pub(crate) fn parse_coordinator_status(token: &str) -> Result<CoordinatorStatus, DatabaseError> {
    match token {
        "pending" => Ok(CoordinatorStatus::Pending),
        "approved" => Ok(CoordinatorStatus::Approved),
        "rejected" => Ok(CoordinatorStatus::Rejected),
        other => Err(DatabaseError::CorruptRow(format!(
            "Unknown coordinator status '{other}'"
        ))),
    }
}

pub(crate) fn manager_status_token(status: ManagerStatus) -> &'static str {
    match status {
        ManagerStatus::NotApplicable => "not_applicable",
        ManagerStatus::PendingApproval => "pending_approval",
        ManagerStatus::Approved => "approved",
        ManagerStatus::Rejected => "rejected",
    }
}

pub(crate) fn parse_manager_status(token: &str) -> Result<ManagerStatus, DatabaseError> {
    match token {
        "not_applicable" => Ok(ManagerStatus::NotApplicable),
        "pending_approval" => Ok(ManagerStatus::PendingApproval),
        "approved" => Ok(ManagerStatus::Approved),
        "rejected" => Ok(ManagerStatus::Rejected),
        other => Err(DatabaseError::CorruptRow(format!(
            "Unknown manager status '{other}'"
        ))),
    }
}

pub(crate) fn parse_role(token: &str) -> Result<Role, DatabaseError> {
    token
        .parse()
        .map_err(|_| DatabaseError::CorruptRow(format!("Unknown role '{token}'")))
}

/// Database row for a claim
#[derive(Debug, Clone, FromRow)]
pub struct ClaimRow {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub lecturer_name: String,
    pub department_name: String,
    pub hourly_rate: Decimal,
    pub currency: String,
    pub month: String,
    pub hours_worked: i32,
    pub notes: Option<String>,
    pub document_path: Option<String>,
    pub document_name: Option<String>,
    pub coordinator_status: String,
    pub manager_status: String,
    pub date_submitted: DateTime<Utc>,
    pub date_verified: Option<DateTime<Utc>>,
    pub date_approved: Option<DateTime<Utc>>,
    pub coordinator_id: Option<String>,
    pub manager_id: Option<String>,
    pub is_deleted: bool,
}

impl TryFrom<ClaimRow> for Claim {
    type Error = DatabaseError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        let coordinator_status = parse_coordinator_status(&row.coordinator_status)?;
        let manager_status = parse_manager_status(&row.manager_status)?;
        // reject pairs the workflow can never produce
        ClaimStatus::from_pair(coordinator_status, manager_status)
            .map_err(|e| DatabaseError::CorruptRow(e.to_string()))?;

        let hours_worked = u32::try_from(row.hours_worked)
            .map_err(|_| DatabaseError::CorruptRow("Negative hours_worked".to_string()))?;

        let supporting_document = match (row.document_path, row.document_name) {
            (Some(path), Some(original_name)) => Some(SupportingDocument {
                path,
                original_name,
            }),
            _ => None,
        };

        Ok(Claim {
            id: row.id.into(),
            lecturer_id: row.lecturer_id.into(),
            lecturer_name: row.lecturer_name,
            department_name: row.department_name,
            hourly_rate: Money::new(row.hourly_rate, parse_currency(&row.currency)?),
            month: row.month,
            hours_worked,
            notes: row.notes,
            supporting_document,
            coordinator_status,
            manager_status,
            date_submitted: row.date_submitted,
            date_verified: row.date_verified,
            date_approved: row.date_approved,
            coordinator_id: row.coordinator_id,
            manager_id: row.manager_id,
            is_deleted: row.is_deleted,
        })
    }
}

/// Database row for a department
#[derive(Debug, Clone, FromRow)]
pub struct DepartmentRow {
    pub id: Uuid,
    pub name: String,
    pub hourly_rate: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DepartmentRow> for Department {
    type Error = DatabaseError;

    fn try_from(row: DepartmentRow) -> Result<Self, Self::Error> {
        Ok(Department {
            id: row.id.into(),
            name: row.name,
            hourly_rate: Money::new(row.hourly_rate, parse_currency(&row.currency)?),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Database row for a lecturer
#[derive(Debug, Clone, FromRow)]
pub struct LecturerRow {
    pub id: Uuid,
    pub name: String,
    pub department_id: Option<Uuid>,
    pub hourly_rate: Decimal,
    pub currency: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<LecturerRow> for Lecturer {
    type Error = DatabaseError;

    fn try_from(row: LecturerRow) -> Result<Self, Self::Error> {
        Ok(Lecturer {
            id: row.id.into(),
            name: row.name,
            department_id: row.department_id.map(Into::into),
            hourly_rate: Money::new(row.hourly_rate, parse_currency(&row.currency)?),
            user_id: row.user_id.map(Into::into),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Database row for a user account
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: Option<Uuid>,
    pub hourly_rate: Option<Decimal>,
    pub currency: Option<String>,
    pub lecturer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DatabaseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let hourly_rate = match (row.hourly_rate, row.currency.as_deref()) {
            (Some(rate), Some(currency)) => Some(Money::new(rate, parse_currency(currency)?)),
            (Some(rate), None) => Some(Money::new(rate, Currency::ZAR)),
            _ => None,
        };

        Ok(User {
            id: row.id.into(),
            username: row.username,
            role: parse_role(&row.role)?,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            department_id: row.department_id.map(Into::into),
            hourly_rate,
            lecturer_id: row.lecturer_id.map(Into::into),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Database row for a module
#[derive(Debug, Clone, FromRow)]
pub struct ModuleRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ModuleRow> for Module {
    fn from(row: ModuleRow) -> Self {
        Module {
            id: row.id.into(),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Database row for a module assignment
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentRow {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub module_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<AssignmentRow> for ModuleAssignment {
    fn from(row: AssignmentRow) -> Self {
        ModuleAssignment {
            id: row.id.into(),
            lecturer_id: row.lecturer_id.into(),
            module_id: row.module_id.into(),
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_tokens_round_trip() {
        for status in [
            CoordinatorStatus::Pending,
            CoordinatorStatus::Approved,
            CoordinatorStatus::Rejected,
        ] {
            assert_eq!(
                parse_coordinator_status(coordinator_status_token(status)).unwrap(),
                status
            );
        }
        for status in [
            ManagerStatus::NotApplicable,
            ManagerStatus::PendingApproval,
            ManagerStatus::Approved,
            ManagerStatus::Rejected,
        ] {
            assert_eq!(
                parse_manager_status(manager_status_token(status)).unwrap(),
                status
            );
        }
    }

    #[test]
    fn test_unknown_tokens_are_corrupt_rows() {
        assert!(parse_coordinator_status("maybe").is_err());
        assert!(parse_manager_status("escalated").is_err());
        assert!(parse_currency("BTC").is_err());
        assert!(parse_role("Dean").is_err());
    }

    #[test]
    fn test_illegal_status_pair_is_rejected_on_hydration() {
        let row = ClaimRow {
            id: Uuid::new_v4(),
            lecturer_id: Uuid::new_v4(),
            lecturer_name: "Thandi Nkosi".to_string(),
            department_name: "Computer Science".to_string(),
            hourly_rate: dec!(350),
            currency: "ZAR".to_string(),
            month: "2026-07".to_string(),
            hours_worked: 100,
            notes: None,
            document_path: None,
            document_name: None,
            // (Pending, Approved) is not a row of the transition table
            coordinator_status: "pending".to_string(),
            manager_status: "approved".to_string(),
            date_submitted: Utc::now(),
            date_verified: None,
            date_approved: None,
            coordinator_id: None,
            manager_id: None,
            is_deleted: false,
        };

        let result = Claim::try_from(row);
        assert!(matches!(result, Err(DatabaseError::CorruptRow(_))));
    }
}
