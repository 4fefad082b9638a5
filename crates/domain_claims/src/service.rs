//! Claim workflow service
//!
//! [`ClaimService`] enforces who may invoke which transition and keeps the
//! read-check-write discipline: every transition re-reads the latest
//! persisted claim, applies the aggregate method (which rejects illegal
//! pre-states), and writes the whole aggregate back in one port call. Two
//! actors racing on the same claim therefore resolve to one success and one
//! `InvalidState` error, never a silent overwrite.

use std::sync::Arc;

use tracing::info;

use core_kernel::{ActorContext, ClaimId, Role};

use crate::claim::{Claim, ClaimSubmission};
use crate::error::ClaimError;
use crate::ports::{ClaimsPort, LecturerProfilePort};
use crate::reporting::ApprovedClaimsReport;

/// Application service over the claim lifecycle
pub struct ClaimService {
    claims: Arc<dyn ClaimsPort>,
    lecturers: Arc<dyn LecturerProfilePort>,
}

impl ClaimService {
    /// Creates a new service over the given ports
    pub fn new(claims: Arc<dyn ClaimsPort>, lecturers: Arc<dyn LecturerProfilePort>) -> Self {
        Self { claims, lecturers }
    }

    fn require_role(actor: &ActorContext, role: Role) -> Result<(), ClaimError> {
        if actor.has_role(role) {
            Ok(())
        } else {
            Err(ClaimError::Unauthorized(format!(
                "{} may not perform this action",
                actor.role
            )))
        }
    }

    /// Loads a claim for a workflow action; soft-deleted claims are
    /// invisible here
    async fn load_active(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        let claim = self.claims.get_claim(id).await?;
        if claim.is_deleted {
            return Err(ClaimError::NotFound(format!("Claim not found: {id}")));
        }
        Ok(claim)
    }

    // ------------------------------------------------------------------
    // Lecturer operations
    // ------------------------------------------------------------------

    /// Submits a new claim for the acting lecturer
    ///
    /// Identity, department, and rate are snapshotted from the lecturer's
    /// profile. Any values a client sends for them are ignored, so a
    /// tampered request cannot inflate its own rate. Requires a department
    /// assignment and hours within bounds; both are checked before
    /// anything is persisted.
    pub async fn submit(
        &self,
        actor: &ActorContext,
        submission: ClaimSubmission,
    ) -> Result<Claim, ClaimError> {
        Self::require_role(actor, Role::Lecturer)?;
        let lecturer_id = actor.lecturer_id.ok_or_else(|| {
            ClaimError::Unauthorized("Account has no lecturer profile".to_string())
        })?;

        let snapshot = self.lecturers.get_snapshot(lecturer_id).await?;
        let department = snapshot.department.ok_or_else(|| {
            ClaimError::Validation(
                "Your profile has no department assigned. Contact HR before submitting claims."
                    .to_string(),
            )
        })?;

        let claim = Claim::submit(
            snapshot.lecturer_id,
            snapshot.name,
            department,
            snapshot.hourly_rate,
            submission,
        )?;

        self.claims.insert_claim(&claim).await?;
        info!(claim = %claim.id, lecturer = %claim.lecturer_id, "Claim submitted");
        Ok(claim)
    }

    /// The acting lecturer's claims, newest first
    pub async fn my_claims(&self, actor: &ActorContext) -> Result<Vec<Claim>, ClaimError> {
        Self::require_role(actor, Role::Lecturer)?;
        let lecturer_id = actor.lecturer_id.ok_or_else(|| {
            ClaimError::Unauthorized("Account has no lecturer profile".to_string())
        })?;
        Ok(self.claims.claims_for_lecturer(lecturer_id).await?)
    }

    // ------------------------------------------------------------------
    // Coordinator operations
    // ------------------------------------------------------------------

    /// Claims awaiting verification
    pub async fn verify_queue(&self, actor: &ActorContext) -> Result<Vec<Claim>, ClaimError> {
        Self::require_role(actor, Role::Coordinator)?;
        Ok(self.claims.claims_pending_verification().await?)
    }

    /// All coordinator-stage claims: pending, verified, and rejected
    pub async fn review_queue(&self, actor: &ActorContext) -> Result<Vec<Claim>, ClaimError> {
        Self::require_role(actor, Role::Coordinator)?;
        Ok(self.claims.claims_in_coordinator_stage().await?)
    }

    /// Coordinator verifies a pending claim
    pub async fn coordinator_approve(
        &self,
        actor: &ActorContext,
        id: ClaimId,
    ) -> Result<Claim, ClaimError> {
        Self::require_role(actor, Role::Coordinator)?;
        let mut claim = self.load_active(id).await?;
        claim.verify(&actor.actor)?;
        self.claims.update_claim(&claim).await?;
        info!(claim = %id, coordinator = %actor.actor, "Claim verified");
        Ok(claim)
    }

    /// Coordinator rejects a pending claim (terminal)
    pub async fn coordinator_reject(
        &self,
        actor: &ActorContext,
        id: ClaimId,
    ) -> Result<Claim, ClaimError> {
        Self::require_role(actor, Role::Coordinator)?;
        let mut claim = self.load_active(id).await?;
        claim.reject_verification(&actor.actor)?;
        self.claims.update_claim(&claim).await?;
        info!(claim = %id, coordinator = %actor.actor, "Claim rejected at verification");
        Ok(claim)
    }

    // ------------------------------------------------------------------
    // Manager operations
    // ------------------------------------------------------------------

    /// Verified claims awaiting final approval
    pub async fn approval_queue(&self, actor: &ActorContext) -> Result<Vec<Claim>, ClaimError> {
        Self::require_role(actor, Role::Manager)?;
        Ok(self.claims.claims_pending_approval().await?)
    }

    /// Manager approves a verified claim (terminal)
    pub async fn manager_approve(
        &self,
        actor: &ActorContext,
        id: ClaimId,
    ) -> Result<Claim, ClaimError> {
        Self::require_role(actor, Role::Manager)?;
        let mut claim = self.load_active(id).await?;
        claim.approve(&actor.actor)?;
        self.claims.update_claim(&claim).await?;
        info!(claim = %id, manager = %actor.actor, "Claim approved");
        Ok(claim)
    }

    /// Manager rejects a verified claim (terminal)
    pub async fn manager_reject(
        &self,
        actor: &ActorContext,
        id: ClaimId,
    ) -> Result<Claim, ClaimError> {
        Self::require_role(actor, Role::Manager)?;
        let mut claim = self.load_active(id).await?;
        claim.reject_approval(&actor.actor)?;
        self.claims.update_claim(&claim).await?;
        info!(claim = %id, manager = %actor.actor, "Claim rejected at approval");
        Ok(claim)
    }

    /// Payout summary over fully approved claims
    pub async fn report(&self, actor: &ActorContext) -> Result<ApprovedClaimsReport, ClaimError> {
        Self::require_role(actor, Role::Manager)?;
        let approved = self.claims.claims_approved().await?;
        Ok(ApprovedClaimsReport::build(&approved))
    }

    // ------------------------------------------------------------------
    // Shared operations
    // ------------------------------------------------------------------

    /// Soft-deletes a claim
    ///
    /// Legal for the owning lecturer or a manager, in any workflow state.
    /// Workflow fields are untouched; the record disappears from every
    /// queue but stays readable by id.
    pub async fn soft_delete(&self, actor: &ActorContext, id: ClaimId) -> Result<(), ClaimError> {
        let mut claim = self.load_active(id).await?;

        let allowed = actor.has_role(Role::Manager)
            || (actor.has_role(Role::Lecturer) && actor.owns_lecturer(claim.lecturer_id));
        if !allowed {
            return Err(ClaimError::Unauthorized(
                "Only the owning lecturer or a manager may delete a claim".to_string(),
            ));
        }

        claim.soft_delete();
        self.claims.update_claim(&claim).await?;
        info!(claim = %id, actor = %actor.actor, "Claim soft-deleted");
        Ok(())
    }

    /// Direct id lookup, including soft-deleted claims (audit)
    ///
    /// Lecturers may only fetch their own claims; coordinators, managers,
    /// and HR may fetch any.
    pub async fn get_claim(&self, actor: &ActorContext, id: ClaimId) -> Result<Claim, ClaimError> {
        let claim = self.claims.get_claim(id).await?;
        if actor.has_role(Role::Lecturer) && !actor.owns_lecturer(claim.lecturer_id) {
            return Err(ClaimError::Unauthorized(
                "Lecturers may only view their own claims".to_string(),
            ));
        }
        Ok(claim)
    }

    /// Every non-deleted claim (HR view)
    pub async fn all_claims(&self, actor: &ActorContext) -> Result<Vec<Claim>, ClaimError> {
        Self::require_role(actor, Role::Hr)?;
        Ok(self.claims.all_claims().await?)
    }
}
