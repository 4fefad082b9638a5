//! Claim domain ports
//!
//! [`ClaimsPort`] is the persistence contract for claims; every query
//! except [`ClaimsPort::get_claim`] excludes soft-deleted records (direct
//! id lookup keeps them reachable for audit). [`LecturerProfilePort`] is
//! the narrow read the engine needs from the directory at submission time
//! (a snapshot of the lecturer identity, department, and rate), so this
//! crate never depends on the directory domain itself.

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, LecturerId, Money, PortError};

use crate::claim::Claim;

/// The lecturer profile data captured onto a claim at submission
#[derive(Debug, Clone)]
pub struct LecturerSnapshot {
    /// The lecturer's identifier
    pub lecturer_id: LecturerId,
    /// Current display name
    pub name: String,
    /// Current department name, if one is assigned
    pub department: Option<String>,
    /// Current hourly rate
    pub hourly_rate: Money,
}

/// Read-side port onto the lecturer directory
#[async_trait]
pub trait LecturerProfilePort: DomainPort {
    /// Returns the current profile snapshot for a lecturer
    async fn get_snapshot(&self, id: LecturerId) -> Result<LecturerSnapshot, PortError>;
}

/// The main persistence port for claims
#[async_trait]
pub trait ClaimsPort: DomainPort {
    /// Retrieves a claim by id, including soft-deleted records (audit)
    async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError>;

    /// Inserts a newly submitted claim
    async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError>;

    /// Persists the claim aggregate after a transition or soft delete
    async fn update_claim(&self, claim: &Claim) -> Result<(), PortError>;

    /// A lecturer's claims, newest first, excluding soft-deleted
    async fn claims_for_lecturer(&self, lecturer_id: LecturerId)
        -> Result<Vec<Claim>, PortError>;

    /// Claims awaiting coordinator verification, newest first
    async fn claims_pending_verification(&self) -> Result<Vec<Claim>, PortError>;

    /// Claims in any coordinator-stage state (pending, verified, or
    /// rejected at verification), newest first
    async fn claims_in_coordinator_stage(&self) -> Result<Vec<Claim>, PortError>;

    /// Claims verified and awaiting manager approval, newest first
    async fn claims_pending_approval(&self) -> Result<Vec<Claim>, PortError>;

    /// Claims fully approved by the manager
    async fn claims_approved(&self) -> Result<Vec<Claim>, PortError>;

    /// Every non-deleted claim (HR view), newest first
    async fn all_claims(&self) -> Result<Vec<Claim>, PortError>;
}

/// In-memory mock implementations for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use crate::claim::{CoordinatorStatus, ManagerStatus};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock claims store
    #[derive(Debug, Default)]
    pub struct MockClaimsPort {
        claims: Arc<RwLock<HashMap<ClaimId, Claim>>>,
    }

    impl MockClaimsPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        async fn filtered(&self, predicate: impl Fn(&Claim) -> bool) -> Vec<Claim> {
            let mut claims: Vec<_> = self
                .claims
                .read()
                .await
                .values()
                .filter(|c| !c.is_deleted && predicate(c))
                .cloned()
                .collect();
            claims.sort_by(|a, b| b.date_submitted.cmp(&a.date_submitted));
            claims
        }
    }

    impl DomainPort for MockClaimsPort {}

    #[async_trait]
    impl ClaimsPort for MockClaimsPort {
        async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError> {
            self.claims
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Claim", id))
        }

        async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError> {
            self.claims.write().await.insert(claim.id, claim.clone());
            Ok(())
        }

        async fn update_claim(&self, claim: &Claim) -> Result<(), PortError> {
            let mut claims = self.claims.write().await;
            if !claims.contains_key(&claim.id) {
                return Err(PortError::not_found("Claim", claim.id));
            }
            claims.insert(claim.id, claim.clone());
            Ok(())
        }

        async fn claims_for_lecturer(
            &self,
            lecturer_id: LecturerId,
        ) -> Result<Vec<Claim>, PortError> {
            Ok(self.filtered(|c| c.lecturer_id == lecturer_id).await)
        }

        async fn claims_pending_verification(&self) -> Result<Vec<Claim>, PortError> {
            Ok(self
                .filtered(|c| {
                    c.coordinator_status == CoordinatorStatus::Pending
                        && c.manager_status == ManagerStatus::NotApplicable
                })
                .await)
        }

        async fn claims_in_coordinator_stage(&self) -> Result<Vec<Claim>, PortError> {
            Ok(self
                .filtered(|c| {
                    !matches!(
                        c.manager_status,
                        ManagerStatus::Approved | ManagerStatus::Rejected
                    )
                })
                .await)
        }

        async fn claims_pending_approval(&self) -> Result<Vec<Claim>, PortError> {
            Ok(self
                .filtered(|c| {
                    c.coordinator_status == CoordinatorStatus::Approved
                        && c.manager_status == ManagerStatus::PendingApproval
                })
                .await)
        }

        async fn claims_approved(&self) -> Result<Vec<Claim>, PortError> {
            Ok(self
                .filtered(|c| c.manager_status == ManagerStatus::Approved)
                .await)
        }

        async fn all_claims(&self) -> Result<Vec<Claim>, PortError> {
            Ok(self.filtered(|_| true).await)
        }
    }

    /// Mock lecturer directory keyed by lecturer id
    #[derive(Debug, Default)]
    pub struct MockLecturerProfilePort {
        snapshots: Arc<RwLock<HashMap<LecturerId, LecturerSnapshot>>>,
    }

    impl MockLecturerProfilePort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Seeds a lecturer snapshot for test setup
        pub async fn seed(&self, snapshot: LecturerSnapshot) {
            self.snapshots
                .write()
                .await
                .insert(snapshot.lecturer_id, snapshot);
        }
    }

    impl DomainPort for MockLecturerProfilePort {}

    #[async_trait]
    impl LecturerProfilePort for MockLecturerProfilePort {
        async fn get_snapshot(&self, id: LecturerId) -> Result<LecturerSnapshot, PortError> {
            self.snapshots
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Lecturer", id))
        }
    }
}
