//! Claim DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_claims::{Claim, ClaimSubmission, SupportingDocument};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitClaimRequest {
    #[validate(length(min = 1, message = "Month is required"))]
    pub month: String,
    #[validate(range(min = 1, max = 220, message = "Hours must be between 1 and 220"))]
    pub hours_worked: u32,
    pub notes: Option<String>,
    /// Reference to a document already placed in the blob store
    pub document: Option<SupportingDocumentDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SupportingDocumentDto {
    pub path: String,
    pub original_name: String,
}

impl From<SubmitClaimRequest> for ClaimSubmission {
    fn from(request: SubmitClaimRequest) -> Self {
        ClaimSubmission {
            month: request.month,
            hours_worked: request.hours_worked,
            notes: request.notes,
            document: request.document.map(|d| SupportingDocument {
                path: d.path,
                original_name: d.original_name,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub lecturer_name: String,
    pub department: String,
    pub month: String,
    pub hours_worked: u32,
    pub hourly_rate: Decimal,
    pub amount: Decimal,
    pub status: String,
    pub coordinator_status: String,
    pub manager_status: String,
    pub date_submitted: DateTime<Utc>,
    pub date_verified: Option<DateTime<Utc>>,
    pub date_approved: Option<DateTime<Utc>>,
    pub coordinator_id: Option<String>,
    pub manager_id: Option<String>,
    pub supporting_document: Option<SupportingDocumentDto>,
    pub is_deleted: bool,
}

impl ClaimResponse {
    /// Builds the response, deriving the status label and the amount
    pub fn from_claim(claim: &Claim) -> Result<Self, ApiError> {
        let status = claim
            .status()
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(Self {
            id: *claim.id.as_uuid(),
            lecturer_id: *claim.lecturer_id.as_uuid(),
            lecturer_name: claim.lecturer_name.clone(),
            department: claim.department_name.clone(),
            month: claim.month.clone(),
            hours_worked: claim.hours_worked,
            hourly_rate: claim.hourly_rate.round_to_currency().amount(),
            amount: claim.amount().round_to_currency().amount(),
            status: status.to_string(),
            coordinator_status: claim.coordinator_status.to_string(),
            manager_status: claim.manager_status.to_string(),
            date_submitted: claim.date_submitted,
            date_verified: claim.date_verified,
            date_approved: claim.date_approved,
            coordinator_id: claim.coordinator_id.clone(),
            manager_id: claim.manager_id.clone(),
            supporting_document: claim.supporting_document.as_ref().map(|d| {
                SupportingDocumentDto {
                    path: d.path.clone(),
                    original_name: d.original_name.clone(),
                }
            }),
            is_deleted: claim.is_deleted,
        })
    }

    /// Maps a claim list into responses
    pub fn from_claims(claims: &[Claim]) -> Result<Vec<Self>, ApiError> {
        claims.iter().map(Self::from_claim).collect()
    }
}
