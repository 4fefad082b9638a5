//! Directory administration handlers (HR)

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::ActorContext;

use crate::dto::directory::*;
use crate::error::ApiError;
use crate::AppState;

// ----------------------------------------------------------------------
// Departments
// ----------------------------------------------------------------------

pub async fn list_departments(
    State(state): State<AppState>,
) -> Result<Json<Vec<DepartmentResponse>>, ApiError> {
    let departments = state.directory.list_departments().await?;
    Ok(Json(departments.iter().map(Into::into).collect()))
}

pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let department = state.directory.get_department(id.into()).await?;
    Ok(Json((&department).into()))
}

pub async fn create_department(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Json(request): Json<CreateDepartmentRequest>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    request.validate()?;
    let department = state
        .directory
        .create_department(&actor, &request.name, request.rate())
        .await?;
    Ok(Json((&department).into()))
}

pub async fn rename_department(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<RenameDepartmentRequest>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    request.validate()?;
    let department = state
        .directory
        .rename_department(&actor, id.into(), &request.name)
        .await?;
    Ok(Json((&department).into()))
}

/// Changes the department rate; the new rate cascades to every linked
/// lecturer and user profile
pub async fn update_department_rate(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRateRequest>,
) -> Result<Json<CascadeResponse>, ApiError> {
    let profiles_updated = state
        .directory
        .update_department_rate(&actor, id.into(), request.rate())
        .await?;
    Ok(Json(CascadeResponse { profiles_updated }))
}

pub async fn delete_department(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.directory.delete_department(&actor, id.into()).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

// ----------------------------------------------------------------------
// Users
// ----------------------------------------------------------------------

pub async fn list_users(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.directory.list_users(&actor).await?;
    Ok(Json(users.iter().map(Into::into).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.directory.get_user(id.into()).await?;
    Ok(Json((&user).into()))
}

pub async fn create_user(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.directory.create_user(&actor, request.into()).await?;
    Ok(Json((&user).into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .directory
        .update_user(&actor, id.into(), request.into())
        .await?;
    Ok(Json((&user).into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.directory.delete_user(&actor, id.into()).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

// ----------------------------------------------------------------------
// Lecturers
// ----------------------------------------------------------------------

pub async fn list_lecturers(
    State(state): State<AppState>,
) -> Result<Json<Vec<LecturerResponse>>, ApiError> {
    let lecturers = state.directory.list_lecturers().await?;
    Ok(Json(lecturers.iter().map(Into::into).collect()))
}

/// HR override of a lecturer's rate, independent of the department
pub async fn override_lecturer_rate(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRateRequest>,
) -> Result<Json<LecturerResponse>, ApiError> {
    let lecturer = state
        .directory
        .override_lecturer_rate(&actor, id.into(), request.rate())
        .await?;
    Ok(Json((&lecturer).into()))
}

// ----------------------------------------------------------------------
// Modules
// ----------------------------------------------------------------------

pub async fn list_modules(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModuleResponse>>, ApiError> {
    let modules = state.directory.list_modules().await?;
    Ok(Json(modules.iter().map(Into::into).collect()))
}

pub async fn create_module(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Json(request): Json<CreateModuleRequest>,
) -> Result<Json<ModuleResponse>, ApiError> {
    request.validate()?;
    let module = state
        .directory
        .create_module(&actor, &request.name, request.description)
        .await?;
    Ok(Json((&module).into()))
}

pub async fn list_assignments(
    State(state): State<AppState>,
) -> Result<Json<Vec<AssignmentResponse>>, ApiError> {
    let assignments = state.directory.module_assignments().await?;
    Ok(Json(assignments.iter().map(Into::into).collect()))
}

pub async fn assign_module(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Json(request): Json<AssignModuleRequest>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let assignment = state
        .directory
        .assign_module(&actor, request.lecturer_id.into(), request.module_id.into())
        .await?;
    Ok(Json((&assignment).into()))
}

pub async fn unassign_module(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.directory.unassign_module(&actor, id.into()).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
