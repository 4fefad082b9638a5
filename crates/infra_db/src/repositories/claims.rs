//! Claims repository
//!
//! Persistence for the claim aggregate. Work facts and snapshot fields are
//! written once at submission; updates touch only the workflow fields and
//! the soft-delete flag, mirroring what the aggregate allows to change.

use sqlx::PgPool;
use uuid::Uuid;

use domain_claims::Claim;

use crate::error::{classify, DatabaseError};
use crate::rows::{coordinator_status_token, currency_token, manager_status_token, ClaimRow};

const CLAIM_COLUMNS: &str = "id, lecturer_id, lecturer_name, department_name, hourly_rate, \
     currency, month, hours_worked, notes, document_path, document_name, coordinator_status, \
     manager_status, date_submitted, date_verified, date_approved, coordinator_id, manager_id, \
     is_deleted";

/// Repository for claim rows
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a claim by id, soft-deleted included
    pub async fn get_by_id(&self, id: Uuid) -> Result<ClaimRow, DatabaseError> {
        let query = format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE id = $1");
        sqlx::query_as::<_, ClaimRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| DatabaseError::not_found("Claim", id))
    }

    /// Inserts a newly submitted claim
    pub async fn insert(&self, claim: &Claim) -> Result<(), DatabaseError> {
        let query = format!(
            "INSERT INTO claims ({CLAIM_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19)"
        );
        sqlx::query(&query)
            .bind(*claim.id.as_uuid())
            .bind(*claim.lecturer_id.as_uuid())
            .bind(&claim.lecturer_name)
            .bind(&claim.department_name)
            .bind(claim.hourly_rate.amount())
            .bind(currency_token(claim.hourly_rate.currency()))
            .bind(&claim.month)
            .bind(claim.hours_worked as i32)
            .bind(&claim.notes)
            .bind(claim.supporting_document.as_ref().map(|d| d.path.clone()))
            .bind(
                claim
                    .supporting_document
                    .as_ref()
                    .map(|d| d.original_name.clone()),
            )
            .bind(coordinator_status_token(claim.coordinator_status))
            .bind(manager_status_token(claim.manager_status))
            .bind(claim.date_submitted)
            .bind(claim.date_verified)
            .bind(claim.date_approved)
            .bind(&claim.coordinator_id)
            .bind(&claim.manager_id)
            .bind(claim.is_deleted)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(())
    }

    /// Persists the mutable part of the aggregate after a transition or
    /// soft delete
    pub async fn update(&self, claim: &Claim) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE claims SET \
                coordinator_status = $2, \
                manager_status = $3, \
                date_verified = $4, \
                date_approved = $5, \
                coordinator_id = $6, \
                manager_id = $7, \
                is_deleted = $8 \
             WHERE id = $1",
        )
        .bind(*claim.id.as_uuid())
        .bind(coordinator_status_token(claim.coordinator_status))
        .bind(manager_status_token(claim.manager_status))
        .bind(claim.date_verified)
        .bind(claim.date_approved)
        .bind(&claim.coordinator_id)
        .bind(&claim.manager_id)
        .bind(claim.is_deleted)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Claim", claim.id));
        }
        Ok(())
    }

    async fn list_where(&self, filter: &str) -> Result<Vec<ClaimRow>, DatabaseError> {
        let query = format!(
            "SELECT {CLAIM_COLUMNS} FROM claims \
             WHERE NOT is_deleted AND ({filter}) \
             ORDER BY date_submitted DESC"
        );
        sqlx::query_as::<_, ClaimRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    /// A lecturer's non-deleted claims, newest first
    pub async fn for_lecturer(&self, lecturer_id: Uuid) -> Result<Vec<ClaimRow>, DatabaseError> {
        let query = format!(
            "SELECT {CLAIM_COLUMNS} FROM claims \
             WHERE NOT is_deleted AND lecturer_id = $1 \
             ORDER BY date_submitted DESC"
        );
        sqlx::query_as::<_, ClaimRow>(&query)
            .bind(lecturer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    /// Claims awaiting coordinator verification
    pub async fn pending_verification(&self) -> Result<Vec<ClaimRow>, DatabaseError> {
        self.list_where(
            "coordinator_status = 'pending' AND manager_status = 'not_applicable'",
        )
        .await
    }

    /// Claims in any coordinator-stage state
    pub async fn coordinator_stage(&self) -> Result<Vec<ClaimRow>, DatabaseError> {
        self.list_where("manager_status NOT IN ('approved', 'rejected')")
            .await
    }

    /// Verified claims awaiting manager approval
    pub async fn pending_approval(&self) -> Result<Vec<ClaimRow>, DatabaseError> {
        self.list_where(
            "coordinator_status = 'approved' AND manager_status = 'pending_approval'",
        )
        .await
    }

    /// Fully approved claims
    pub async fn approved(&self) -> Result<Vec<ClaimRow>, DatabaseError> {
        self.list_where("manager_status = 'approved'").await
    }

    /// Every non-deleted claim
    pub async fn all(&self) -> Result<Vec<ClaimRow>, DatabaseError> {
        self.list_where("TRUE").await
    }
}
