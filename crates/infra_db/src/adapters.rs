//! Port adapters over the PostgreSQL repositories
//!
//! Each adapter implements a domain port trait by delegating to a
//! repository and translating rows and errors at the boundary. Hydration
//! re-validates status pairs, roles, and currencies, so corrupt storage
//! surfaces as an error instead of an illegal aggregate.

use async_trait::async_trait;
use sqlx::PgPool;

use core_kernel::{
    AssignmentId, ClaimId, DepartmentId, DomainPort, LecturerId, ModuleId, Money, PortError,
    UserId,
};
use domain_claims::{Claim, ClaimsPort, LecturerProfilePort, LecturerSnapshot};
use domain_directory::{
    Department, DirectoryPort, Lecturer, Module, ModuleAssignment, PairingAction, User,
};

use crate::error::classify;
use crate::repositories::{ClaimsRepository, DirectoryRepository};
use crate::rows::{parse_currency, ClaimRow};

fn hydrate_claims(rows: Vec<ClaimRow>) -> Result<Vec<Claim>, PortError> {
    rows.into_iter()
        .map(|row| Claim::try_from(row).map_err(PortError::from))
        .collect()
}

/// PostgreSQL adapter for [`ClaimsPort`]
#[derive(Debug, Clone)]
pub struct PgClaimsAdapter {
    repository: ClaimsRepository,
}

impl PgClaimsAdapter {
    /// Creates a new adapter over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool),
        }
    }
}

impl DomainPort for PgClaimsAdapter {}

#[async_trait]
impl ClaimsPort for PgClaimsAdapter {
    async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError> {
        let row = self
            .repository
            .get_by_id(*id.as_uuid())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PortError::not_found("Claim", id)
                } else {
                    e.into()
                }
            })?;
        Claim::try_from(row).map_err(PortError::from)
    }

    async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError> {
        self.repository.insert(claim).await.map_err(PortError::from)
    }

    async fn update_claim(&self, claim: &Claim) -> Result<(), PortError> {
        self.repository.update(claim).await.map_err(|e| {
            if e.is_not_found() {
                PortError::not_found("Claim", claim.id)
            } else {
                e.into()
            }
        })
    }

    async fn claims_for_lecturer(
        &self,
        lecturer_id: LecturerId,
    ) -> Result<Vec<Claim>, PortError> {
        hydrate_claims(
            self.repository
                .for_lecturer(*lecturer_id.as_uuid())
                .await
                .map_err(PortError::from)?,
        )
    }

    async fn claims_pending_verification(&self) -> Result<Vec<Claim>, PortError> {
        hydrate_claims(
            self.repository
                .pending_verification()
                .await
                .map_err(PortError::from)?,
        )
    }

    async fn claims_in_coordinator_stage(&self) -> Result<Vec<Claim>, PortError> {
        hydrate_claims(
            self.repository
                .coordinator_stage()
                .await
                .map_err(PortError::from)?,
        )
    }

    async fn claims_pending_approval(&self) -> Result<Vec<Claim>, PortError> {
        hydrate_claims(
            self.repository
                .pending_approval()
                .await
                .map_err(PortError::from)?,
        )
    }

    async fn claims_approved(&self) -> Result<Vec<Claim>, PortError> {
        hydrate_claims(self.repository.approved().await.map_err(PortError::from)?)
    }

    async fn all_claims(&self) -> Result<Vec<Claim>, PortError> {
        hydrate_claims(self.repository.all().await.map_err(PortError::from)?)
    }
}

/// Row shape for the lecturer snapshot join
#[derive(Debug, sqlx::FromRow)]
struct SnapshotRow {
    id: uuid::Uuid,
    name: String,
    department: Option<String>,
    hourly_rate: rust_decimal::Decimal,
    currency: String,
}

/// PostgreSQL adapter for [`LecturerProfilePort`]
#[derive(Debug, Clone)]
pub struct PgLecturerProfileAdapter {
    pool: PgPool,
}

impl PgLecturerProfileAdapter {
    /// Creates a new adapter over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgLecturerProfileAdapter {}

#[async_trait]
impl LecturerProfilePort for PgLecturerProfileAdapter {
    async fn get_snapshot(&self, id: LecturerId) -> Result<LecturerSnapshot, PortError> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            "SELECT l.id, l.name, d.name AS department, l.hourly_rate, l.currency \
             FROM lecturers l \
             LEFT JOIN departments d ON d.id = l.department_id \
             WHERE l.id = $1",
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::from(classify(e)))?
        .ok_or_else(|| PortError::not_found("Lecturer", id))?;

        Ok(LecturerSnapshot {
            lecturer_id: row.id.into(),
            name: row.name,
            department: row.department,
            hourly_rate: Money::new(
                row.hourly_rate,
                parse_currency(&row.currency).map_err(PortError::from)?,
            ),
        })
    }
}

/// PostgreSQL adapter for [`DirectoryPort`]
#[derive(Debug, Clone)]
pub struct PgDirectoryAdapter {
    repository: DirectoryRepository,
}

impl PgDirectoryAdapter {
    /// Creates a new adapter over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DirectoryRepository::new(pool),
        }
    }
}

impl DomainPort for PgDirectoryAdapter {}

#[async_trait]
impl DirectoryPort for PgDirectoryAdapter {
    async fn get_department(&self, id: DepartmentId) -> Result<Department, PortError> {
        let row = self
            .repository
            .get_department(*id.as_uuid())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PortError::not_found("Department", id)
                } else {
                    e.into()
                }
            })?;
        Department::try_from(row).map_err(PortError::from)
    }

    async fn list_departments(&self) -> Result<Vec<Department>, PortError> {
        self.repository
            .list_departments()
            .await
            .map_err(PortError::from)?
            .into_iter()
            .map(|row| Department::try_from(row).map_err(PortError::from))
            .collect()
    }

    async fn insert_department(&self, department: &Department) -> Result<(), PortError> {
        self.repository
            .insert_department(department)
            .await
            .map_err(PortError::from)
    }

    async fn update_department(&self, department: &Department) -> Result<(), PortError> {
        self.repository
            .update_department(department)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PortError::not_found("Department", department.id)
                } else {
                    e.into()
                }
            })
    }

    async fn delete_department(&self, id: DepartmentId) -> Result<(), PortError> {
        self.repository
            .delete_department(*id.as_uuid())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PortError::not_found("Department", id)
                } else {
                    e.into()
                }
            })
    }

    async fn cascade_department_rate(
        &self,
        id: DepartmentId,
        new_rate: Money,
    ) -> Result<u32, PortError> {
        self.repository
            .cascade_rate(
                *id.as_uuid(),
                new_rate.amount(),
                new_rate.currency().code(),
            )
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PortError::not_found("Department", id)
                } else {
                    e.into()
                }
            })
    }

    async fn get_lecturer(&self, id: LecturerId) -> Result<Lecturer, PortError> {
        let row = self
            .repository
            .get_lecturer(*id.as_uuid())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PortError::not_found("Lecturer", id)
                } else {
                    e.into()
                }
            })?;
        Lecturer::try_from(row).map_err(PortError::from)
    }

    async fn list_lecturers(&self) -> Result<Vec<Lecturer>, PortError> {
        self.repository
            .list_lecturers()
            .await
            .map_err(PortError::from)?
            .into_iter()
            .map(|row| Lecturer::try_from(row).map_err(PortError::from))
            .collect()
    }

    async fn update_lecturer(&self, lecturer: &Lecturer) -> Result<(), PortError> {
        self.repository
            .update_lecturer(lecturer)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PortError::not_found("Lecturer", lecturer.id)
                } else {
                    e.into()
                }
            })
    }

    async fn get_user(&self, id: UserId) -> Result<User, PortError> {
        let row = self.repository.get_user(*id.as_uuid()).await.map_err(|e| {
            if e.is_not_found() {
                PortError::not_found("User", id)
            } else {
                e.into()
            }
        })?;
        User::try_from(row).map_err(PortError::from)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, PortError> {
        self.repository
            .find_user_by_username(username)
            .await
            .map_err(PortError::from)?
            .map(|row| User::try_from(row).map_err(PortError::from))
            .transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, PortError> {
        self.repository
            .list_users()
            .await
            .map_err(PortError::from)?
            .into_iter()
            .map(|row| User::try_from(row).map_err(PortError::from))
            .collect()
    }

    async fn save_user_with_pairing(
        &self,
        user: &User,
        pairing: &PairingAction,
    ) -> Result<(), PortError> {
        self.repository
            .save_user_with_pairing(user, pairing)
            .await
            .map_err(PortError::from)
    }

    async fn delete_user(
        &self,
        id: UserId,
        linked_lecturer: Option<LecturerId>,
    ) -> Result<(), PortError> {
        self.repository
            .delete_user(*id.as_uuid(), linked_lecturer.map(|l| *l.as_uuid()))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PortError::not_found("User", id)
                } else {
                    e.into()
                }
            })
    }

    async fn get_module(&self, id: ModuleId) -> Result<Module, PortError> {
        let row = self
            .repository
            .get_module(*id.as_uuid())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PortError::not_found("Module", id)
                } else {
                    e.into()
                }
            })?;
        Ok(row.into())
    }

    async fn list_modules(&self) -> Result<Vec<Module>, PortError> {
        Ok(self
            .repository
            .list_modules()
            .await
            .map_err(PortError::from)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn find_module_by_name(&self, name: &str) -> Result<Option<Module>, PortError> {
        Ok(self
            .repository
            .find_module_by_name(name)
            .await
            .map_err(PortError::from)?
            .map(Into::into))
    }

    async fn insert_module(&self, module: &Module) -> Result<(), PortError> {
        self.repository
            .insert_module(
                *module.id.as_uuid(),
                &module.name,
                module.description.as_deref(),
                module.created_at,
            )
            .await
            .map_err(PortError::from)
    }

    async fn list_assignments(&self) -> Result<Vec<ModuleAssignment>, PortError> {
        Ok(self
            .repository
            .list_assignments()
            .await
            .map_err(PortError::from)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn assignment_exists(
        &self,
        lecturer_id: LecturerId,
        module_id: ModuleId,
    ) -> Result<bool, PortError> {
        self.repository
            .assignment_exists(*lecturer_id.as_uuid(), *module_id.as_uuid())
            .await
            .map_err(PortError::from)
    }

    async fn insert_assignment(&self, assignment: &ModuleAssignment) -> Result<(), PortError> {
        self.repository
            .insert_assignment(
                *assignment.id.as_uuid(),
                *assignment.lecturer_id.as_uuid(),
                *assignment.module_id.as_uuid(),
                assignment.created_at,
            )
            .await
            .map_err(PortError::from)
    }

    async fn delete_assignment(&self, id: AssignmentId) -> Result<(), PortError> {
        self.repository
            .delete_assignment(*id.as_uuid())
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PortError::not_found("ModuleAssignment", id)
                } else {
                    e.into()
                }
            })
    }
}
