//! Claim workflow handlers
//!
//! Thin glue: each handler validates the DTO, hands the actor context and
//! request to [`domain_claims::ClaimService`], and maps the result. Role
//! and ownership checks live in the service, not here.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::ActorContext;
use domain_claims::ApprovedClaimsReport;

use crate::dto::claims::{ClaimResponse, SubmitClaimRequest};
use crate::error::ApiError;
use crate::AppState;

/// Submits a new claim for the acting lecturer
pub async fn submit(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    request.validate()?;
    let claim = state.claims.submit(&actor, request.into()).await?;
    Ok(Json(ClaimResponse::from_claim(&claim)?))
}

/// The acting lecturer's claims
pub async fn my_claims(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.claims.my_claims(&actor).await?;
    Ok(Json(ClaimResponse::from_claims(&claims)?))
}

/// Direct claim lookup, soft-deleted included (audit)
pub async fn get_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.get_claim(&actor, id.into()).await?;
    Ok(Json(ClaimResponse::from_claim(&claim)?))
}

/// Soft-deletes a claim (owning lecturer or manager)
pub async fn delete_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.claims.soft_delete(&actor, id.into()).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Claims awaiting verification (coordinator)
pub async fn verify_queue(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.claims.verify_queue(&actor).await?;
    Ok(Json(ClaimResponse::from_claims(&claims)?))
}

/// All coordinator-stage claims (coordinator)
pub async fn review_queue(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.claims.review_queue(&actor).await?;
    Ok(Json(ClaimResponse::from_claims(&claims)?))
}

/// Coordinator verifies a pending claim
pub async fn verify(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.coordinator_approve(&actor, id.into()).await?;
    Ok(Json(ClaimResponse::from_claim(&claim)?))
}

/// Coordinator rejects a pending claim
pub async fn reject_verification(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.coordinator_reject(&actor, id.into()).await?;
    Ok(Json(ClaimResponse::from_claim(&claim)?))
}

/// Verified claims awaiting final approval (manager)
pub async fn approval_queue(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.claims.approval_queue(&actor).await?;
    Ok(Json(ClaimResponse::from_claims(&claims)?))
}

/// Manager approves a verified claim
pub async fn approve(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.manager_approve(&actor, id.into()).await?;
    Ok(Json(ClaimResponse::from_claim(&claim)?))
}

/// Manager rejects a verified claim
pub async fn reject(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.manager_reject(&actor, id.into()).await?;
    Ok(Json(ClaimResponse::from_claim(&claim)?))
}

/// Payout report over fully approved claims (manager)
pub async fn report(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
) -> Result<Json<ApprovedClaimsReport>, ApiError> {
    let report = state.claims.report(&actor).await?;
    Ok(Json(report))
}

/// Every non-deleted claim (HR)
pub async fn all_claims(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.claims.all_claims(&actor).await?;
    Ok(Json(ClaimResponse::from_claims(&claims)?))
}
