//! Claim aggregate and its approval state machine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimId, LecturerId, Money};

use crate::document::SupportingDocument;
use crate::error::ClaimError;

/// Minimum claimable hours per month
pub const MIN_HOURS: u32 = 1;
/// Maximum claimable hours per month
pub const MAX_HOURS: u32 = 220;

/// First-stage verification status, owned by the Coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinatorStatus {
    /// Awaiting verification
    Pending,
    /// Verified, forwarded to the Manager
    Approved,
    /// Rejected at verification (terminal)
    Rejected,
}

impl fmt::Display for CoordinatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoordinatorStatus::Pending => "Pending",
            CoordinatorStatus::Approved => "Approved",
            CoordinatorStatus::Rejected => "Rejected",
        };
        write!(f, "{s}")
    }
}

/// Final approval status, owned by the Manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagerStatus {
    /// Not yet (or never) in the manager's queue
    NotApplicable,
    /// Verified and awaiting final approval
    PendingApproval,
    /// Approved for payout (terminal)
    Approved,
    /// Rejected at final approval (terminal)
    Rejected,
}

impl fmt::Display for ManagerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ManagerStatus::NotApplicable => "N/A",
            ManagerStatus::PendingApproval => "Pending Approval",
            ManagerStatus::Approved => "Approved",
            ManagerStatus::Rejected => "Rejected",
        };
        write!(f, "{s}")
    }
}

/// The derived display status of a claim
///
/// Exactly five (CoordinatorStatus, ManagerStatus) combinations are
/// reachable; this enum is the closed set of their labels. It is always
/// computed from the pair, never stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// (Pending, N/A), the initial state
    PendingVerification,
    /// (Approved, Pending Approval)
    VerifiedByCoordinator,
    /// (Rejected, N/A), terminal
    RejectedByCoordinator,
    /// (Approved, Approved), terminal
    FullyApproved,
    /// (Approved, Rejected), terminal
    RejectedByManager,
}

impl ClaimStatus {
    /// Derives the status label from the authority pair
    ///
    /// Fails for the combinations the workflow can never produce; adapters
    /// call this when hydrating so an illegal pair is rejected at the
    /// boundary instead of flowing through the engine.
    pub fn from_pair(
        coordinator: CoordinatorStatus,
        manager: ManagerStatus,
    ) -> Result<Self, ClaimError> {
        use CoordinatorStatus as C;
        use ManagerStatus as M;
        match (coordinator, manager) {
            (C::Pending, M::NotApplicable) => Ok(ClaimStatus::PendingVerification),
            (C::Approved, M::PendingApproval) => Ok(ClaimStatus::VerifiedByCoordinator),
            (C::Rejected, M::NotApplicable) => Ok(ClaimStatus::RejectedByCoordinator),
            (C::Approved, M::Approved) => Ok(ClaimStatus::FullyApproved),
            (C::Approved, M::Rejected) => Ok(ClaimStatus::RejectedByManager),
            (c, m) => Err(ClaimError::Validation(format!(
                "Illegal status combination: coordinator '{c}', manager '{m}'"
            ))),
        }
    }

    /// Returns true if no further transition is possible from this status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ClaimStatus::RejectedByCoordinator
                | ClaimStatus::FullyApproved
                | ClaimStatus::RejectedByManager
        )
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClaimStatus::PendingVerification => "Pending Verification",
            ClaimStatus::VerifiedByCoordinator => "Verified by Coordinator",
            ClaimStatus::RejectedByCoordinator => "Rejected by Coordinator",
            ClaimStatus::FullyApproved => "Fully Approved",
            ClaimStatus::RejectedByManager => "Rejected by Manager",
        };
        write!(f, "{s}")
    }
}

/// The lecturer-supplied part of a claim
///
/// Identity, department, and rate are never taken from here; the service
/// snapshots them from the lecturer's profile at submission time.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimSubmission {
    /// Period label, e.g. "2026-07" or "July 2026"
    pub month: String,
    /// Hours worked in the period
    pub hours_worked: u32,
    /// Free-form notes to the coordinator
    pub notes: Option<String>,
    /// Supporting document already placed in the blob store
    pub document: Option<SupportingDocument>,
}

/// A lecturer's monthly hours-worked claim
///
/// The lecturer name, department name, and hourly rate are snapshots taken
/// at submission time; later profile or department-rate changes never alter
/// an existing claim. The payable amount is always computed from the
/// snapshot, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Owning lecturer
    pub lecturer_id: LecturerId,
    /// Lecturer name at submission time
    pub lecturer_name: String,
    /// Department name at submission time
    pub department_name: String,
    /// Hourly rate at submission time
    pub hourly_rate: Money,
    /// Period label
    pub month: String,
    /// Hours worked, within [MIN_HOURS, MAX_HOURS]
    pub hours_worked: u32,
    /// Notes to the coordinator
    pub notes: Option<String>,
    /// Supporting document reference
    pub supporting_document: Option<SupportingDocument>,
    /// First-stage status
    pub coordinator_status: CoordinatorStatus,
    /// Final-stage status
    pub manager_status: ManagerStatus,
    /// When the claim was submitted
    pub date_submitted: DateTime<Utc>,
    /// When the coordinator acted
    pub date_verified: Option<DateTime<Utc>>,
    /// When the manager acted
    pub date_approved: Option<DateTime<Utc>>,
    /// Identity of the acting coordinator
    pub coordinator_id: Option<String>,
    /// Identity of the acting manager
    pub manager_id: Option<String>,
    /// Soft-delete flag; hidden from every query when set
    pub is_deleted: bool,
}

impl Claim {
    /// Creates a new claim in the initial (Pending, N/A) state
    ///
    /// The snapshot arguments come from the lecturer's current profile;
    /// the submission carries only the work facts.
    pub fn submit(
        lecturer_id: LecturerId,
        lecturer_name: impl Into<String>,
        department_name: impl Into<String>,
        hourly_rate: Money,
        submission: ClaimSubmission,
    ) -> Result<Self, ClaimError> {
        if submission.month.trim().is_empty() {
            return Err(ClaimError::Validation("Claim month is required".to_string()));
        }
        if submission.hours_worked < MIN_HOURS || submission.hours_worked > MAX_HOURS {
            return Err(ClaimError::Validation(format!(
                "Hours worked must be between {MIN_HOURS} and {MAX_HOURS}, got {}",
                submission.hours_worked
            )));
        }
        if !hourly_rate.is_positive() {
            return Err(ClaimError::Validation(
                "Hourly rate must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            id: ClaimId::new_v7(),
            lecturer_id,
            lecturer_name: lecturer_name.into(),
            department_name: department_name.into(),
            hourly_rate,
            month: submission.month.trim().to_string(),
            hours_worked: submission.hours_worked,
            notes: submission.notes,
            supporting_document: submission.document,
            coordinator_status: CoordinatorStatus::Pending,
            manager_status: ManagerStatus::NotApplicable,
            date_submitted: Utc::now(),
            date_verified: None,
            date_approved: None,
            coordinator_id: None,
            manager_id: None,
            is_deleted: false,
        })
    }

    /// The payable amount: hours worked times the snapshot hourly rate
    pub fn amount(&self) -> Money {
        self.hourly_rate.multiply(Decimal::from(self.hours_worked))
    }

    /// The derived display status
    ///
    /// Total for every claim produced through this aggregate; fails only on
    /// a pair that was never reachable (e.g. tampered storage).
    pub fn status(&self) -> Result<ClaimStatus, ClaimError> {
        ClaimStatus::from_pair(self.coordinator_status, self.manager_status)
    }

    /// Returns true if no further workflow transition is possible
    pub fn is_terminal(&self) -> bool {
        self.status().map(|s| s.is_terminal()).unwrap_or(true)
    }

    fn status_label(&self) -> String {
        self.status()
            .map(|s| s.to_string())
            .unwrap_or_else(|_| format!("{}/{}", self.coordinator_status, self.manager_status))
    }

    /// Coordinator verifies the claim: (Pending, N/A) -> (Approved, Pending Approval)
    ///
    /// Stamps the acting coordinator and the verification timestamp.
    /// Re-verifying an already verified claim is an error, not an
    /// idempotent success.
    pub fn verify(&mut self, coordinator: &str) -> Result<(), ClaimError> {
        if self.status()? != ClaimStatus::PendingVerification {
            return Err(ClaimError::invalid_state("verify", self.status_label()));
        }
        self.coordinator_status = CoordinatorStatus::Approved;
        self.manager_status = ManagerStatus::PendingApproval;
        self.coordinator_id = Some(coordinator.to_string());
        self.date_verified = Some(Utc::now());
        Ok(())
    }

    /// Coordinator rejects the claim: (Pending, N/A) -> (Rejected, N/A), terminal
    pub fn reject_verification(&mut self, coordinator: &str) -> Result<(), ClaimError> {
        if self.status()? != ClaimStatus::PendingVerification {
            return Err(ClaimError::invalid_state("reject", self.status_label()));
        }
        self.coordinator_status = CoordinatorStatus::Rejected;
        self.manager_status = ManagerStatus::NotApplicable;
        self.coordinator_id = Some(coordinator.to_string());
        self.date_verified = Some(Utc::now());
        Ok(())
    }

    /// Manager approves the claim:
    /// (Approved, Pending Approval) -> (Approved, Approved), terminal
    pub fn approve(&mut self, manager: &str) -> Result<(), ClaimError> {
        if self.status()? != ClaimStatus::VerifiedByCoordinator {
            return Err(ClaimError::invalid_state("approve", self.status_label()));
        }
        self.manager_status = ManagerStatus::Approved;
        self.manager_id = Some(manager.to_string());
        self.date_approved = Some(Utc::now());
        Ok(())
    }

    /// Manager rejects the claim:
    /// (Approved, Pending Approval) -> (Approved, Rejected), terminal
    pub fn reject_approval(&mut self, manager: &str) -> Result<(), ClaimError> {
        if self.status()? != ClaimStatus::VerifiedByCoordinator {
            return Err(ClaimError::invalid_state("reject", self.status_label()));
        }
        self.manager_status = ManagerStatus::Rejected;
        self.manager_id = Some(manager.to_string());
        self.date_approved = Some(Utc::now());
        Ok(())
    }

    /// Marks the claim deleted without touching the workflow fields
    ///
    /// Legal in any state; the record stays retrievable by id for audit.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn submission(hours: u32) -> ClaimSubmission {
        ClaimSubmission {
            month: "2026-07".to_string(),
            hours_worked: hours,
            notes: None,
            document: None,
        }
    }

    fn new_claim() -> Claim {
        Claim::submit(
            LecturerId::new(),
            "Thandi Nkosi",
            "Computer Science",
            Money::new(dec!(350), Currency::ZAR),
            submission(120),
        )
        .unwrap()
    }

    #[test]
    fn test_submit_starts_pending() {
        let claim = new_claim();
        assert_eq!(claim.coordinator_status, CoordinatorStatus::Pending);
        assert_eq!(claim.manager_status, ManagerStatus::NotApplicable);
        assert_eq!(claim.status().unwrap(), ClaimStatus::PendingVerification);
        assert!(!claim.is_terminal());
        assert!(!claim.is_deleted);
    }

    #[test]
    fn test_amount_is_derived() {
        let claim = new_claim();
        assert_eq!(claim.amount().amount(), dec!(42000)); // 120 * 350
    }

    #[test]
    fn test_hours_bounds() {
        let rate = Money::new(dec!(350), Currency::ZAR);
        let ok = Claim::submit(LecturerId::new(), "a", "d", rate, submission(220));
        assert!(ok.is_ok());

        let too_many = Claim::submit(LecturerId::new(), "a", "d", rate, submission(221));
        assert!(matches!(too_many, Err(ClaimError::Validation(_))));

        let zero = Claim::submit(LecturerId::new(), "a", "d", rate, submission(0));
        assert!(matches!(zero, Err(ClaimError::Validation(_))));
    }

    #[test]
    fn test_blank_month_rejected() {
        let rate = Money::new(dec!(350), Currency::ZAR);
        let mut sub = submission(10);
        sub.month = "  ".to_string();
        let result = Claim::submit(LecturerId::new(), "a", "d", rate, sub);
        assert!(matches!(result, Err(ClaimError::Validation(_))));
    }

    #[test]
    fn test_verify_moves_to_manager_queue() {
        let mut claim = new_claim();
        claim.verify("coord").unwrap();

        assert_eq!(claim.status().unwrap(), ClaimStatus::VerifiedByCoordinator);
        assert_eq!(claim.coordinator_id.as_deref(), Some("coord"));
        assert!(claim.date_verified.is_some());
        assert_eq!(claim.manager_status, ManagerStatus::PendingApproval);
    }

    #[test]
    fn test_verify_twice_is_invalid_state() {
        let mut claim = new_claim();
        claim.verify("coord").unwrap();
        let result = claim.verify("coord");
        assert!(matches!(result, Err(ClaimError::InvalidState { .. })));
    }

    #[test]
    fn test_reject_verification_is_terminal() {
        let mut claim = new_claim();
        claim.reject_verification("coord").unwrap();

        assert_eq!(claim.status().unwrap(), ClaimStatus::RejectedByCoordinator);
        assert_eq!(claim.manager_status, ManagerStatus::NotApplicable);
        assert!(claim.is_terminal());
        assert!(claim.approve("mgr").is_err());
    }

    #[test]
    fn test_full_approval_path() {
        let mut claim = new_claim();
        claim.verify("coord").unwrap();
        claim.approve("mgr").unwrap();

        assert_eq!(claim.status().unwrap(), ClaimStatus::FullyApproved);
        assert_eq!(claim.manager_id.as_deref(), Some("mgr"));
        assert!(claim.date_approved.is_some());
        assert!(claim.is_terminal());
    }

    #[test]
    fn test_manager_cannot_act_before_verification() {
        let mut claim = new_claim();
        assert!(matches!(
            claim.approve("mgr"),
            Err(ClaimError::InvalidState { .. })
        ));
        assert!(matches!(
            claim.reject_approval("mgr"),
            Err(ClaimError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_manager_rejection_is_terminal() {
        let mut claim = new_claim();
        claim.verify("coord").unwrap();
        claim.reject_approval("mgr").unwrap();

        assert_eq!(claim.status().unwrap(), ClaimStatus::RejectedByManager);
        assert!(claim.is_terminal());
    }

    #[test]
    fn test_soft_delete_leaves_workflow_fields() {
        let mut claim = new_claim();
        claim.verify("coord").unwrap();
        claim.soft_delete();

        assert!(claim.is_deleted);
        assert_eq!(claim.status().unwrap(), ClaimStatus::VerifiedByCoordinator);
        assert_eq!(claim.coordinator_id.as_deref(), Some("coord"));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(
            ClaimStatus::PendingVerification.to_string(),
            "Pending Verification"
        );
        assert_eq!(
            ClaimStatus::VerifiedByCoordinator.to_string(),
            "Verified by Coordinator"
        );
        assert_eq!(ClaimStatus::FullyApproved.to_string(), "Fully Approved");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinator_status() -> impl Strategy<Value = CoordinatorStatus> {
        prop_oneof![
            Just(CoordinatorStatus::Pending),
            Just(CoordinatorStatus::Approved),
            Just(CoordinatorStatus::Rejected),
        ]
    }

    fn manager_status() -> impl Strategy<Value = ManagerStatus> {
        prop_oneof![
            Just(ManagerStatus::NotApplicable),
            Just(ManagerStatus::PendingApproval),
            Just(ManagerStatus::Approved),
            Just(ManagerStatus::Rejected),
        ]
    }

    proptest! {
        /// Of the 12 possible pairs, exactly the 5 rows of the transition
        /// table derive a status; everything else is rejected.
        #[test]
        fn only_the_five_table_rows_are_legal(
            c in coordinator_status(),
            m in manager_status()
        ) {
            use CoordinatorStatus as C;
            use ManagerStatus as M;

            let legal = matches!(
                (c, m),
                (C::Pending, M::NotApplicable)
                    | (C::Approved, M::PendingApproval)
                    | (C::Rejected, M::NotApplicable)
                    | (C::Approved, M::Approved)
                    | (C::Approved, M::Rejected)
            );

            prop_assert_eq!(ClaimStatus::from_pair(c, m).is_ok(), legal);
        }
    }
}
