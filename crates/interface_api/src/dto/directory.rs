//! Directory DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Currency, Money, Role};
use domain_directory::{Department, Lecturer, Module, ModuleAssignment, NewUser, UpdateUser, User};

fn zar(amount: Decimal) -> Money {
    Money::new(amount, Currency::ZAR)
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, message = "Department name is required"))]
    pub name: String,
    pub hourly_rate: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RenameDepartmentRequest {
    #[validate(length(min = 1, message = "Department name is required"))]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRateRequest {
    pub hourly_rate: Decimal,
}

impl UpdateRateRequest {
    pub fn rate(&self) -> Money {
        zar(self.hourly_rate)
    }
}

impl CreateDepartmentRequest {
    pub fn rate(&self) -> Money {
        zar(self.hourly_rate)
    }
}

#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub id: Uuid,
    pub name: String,
    pub hourly_rate: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Department> for DepartmentResponse {
    fn from(department: &Department) -> Self {
        Self {
            id: *department.id.as_uuid(),
            name: department.name.clone(),
            hourly_rate: department.hourly_rate.round_to_currency().amount(),
            created_at: department.created_at,
            updated_at: department.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CascadeResponse {
    pub profiles_updated: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: Option<Uuid>,
    pub hourly_rate: Option<Decimal>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        NewUser {
            username: request.username,
            role: request.role,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            department_id: request.department_id.map(Into::into),
            hourly_rate: request.hourly_rate.map(zar),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub role: Option<Role>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department_id: Option<Uuid>,
    pub hourly_rate: Option<Decimal>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(request: UpdateUserRequest) -> Self {
        UpdateUser {
            role: request.role,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            department_id: request.department_id.map(Into::into),
            hourly_rate: request.hourly_rate.map(zar),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: Option<Uuid>,
    pub hourly_rate: Option<Decimal>,
    pub lecturer_id: Option<Uuid>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            username: user.username.clone(),
            role: user.role.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            department_id: user.department_id.map(|d| *d.as_uuid()),
            hourly_rate: user.hourly_rate.map(|r| r.round_to_currency().amount()),
            lecturer_id: user.lecturer_id.map(|l| *l.as_uuid()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LecturerResponse {
    pub id: Uuid,
    pub name: String,
    pub department_id: Option<Uuid>,
    pub hourly_rate: Decimal,
    pub user_id: Option<Uuid>,
}

impl From<&Lecturer> for LecturerResponse {
    fn from(lecturer: &Lecturer) -> Self {
        Self {
            id: *lecturer.id.as_uuid(),
            name: lecturer.name.clone(),
            department_id: lecturer.department_id.map(|d| *d.as_uuid()),
            hourly_rate: lecturer.hourly_rate.round_to_currency().amount(),
            user_id: lecturer.user_id.map(|u| *u.as_uuid()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateModuleRequest {
    #[validate(length(min = 1, message = "Module name is required"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModuleResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Module> for ModuleResponse {
    fn from(module: &Module) -> Self {
        Self {
            id: *module.id.as_uuid(),
            name: module.name.clone(),
            description: module.description.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AssignModuleRequest {
    pub lecturer_id: Uuid,
    pub module_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub lecturer_id: Uuid,
    pub module_id: Uuid,
}

impl From<&ModuleAssignment> for AssignmentResponse {
    fn from(assignment: &ModuleAssignment) -> Self {
        Self {
            id: *assignment.id.as_uuid(),
            lecturer_id: *assignment.lecturer_id.as_uuid(),
            module_id: *assignment.module_id.as_uuid(),
        }
    }
}
