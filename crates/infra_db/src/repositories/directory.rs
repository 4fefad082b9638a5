//! Directory repository
//!
//! Persistence for departments, lecturers, users, and modules. The rate
//! cascade, the user/lecturer pairing, and department deletion each run in
//! a single transaction: either every linked row changes or none does.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use domain_directory::{Department, Lecturer, PairingAction, User};

use crate::error::{classify, DatabaseError};
use crate::rows::{currency_token, AssignmentRow, DepartmentRow, LecturerRow, ModuleRow, UserRow};

const DEPARTMENT_COLUMNS: &str = "id, name, hourly_rate, currency, created_at, updated_at";
const LECTURER_COLUMNS: &str =
    "id, name, department_id, hourly_rate, currency, user_id, created_at, updated_at";
const USER_COLUMNS: &str = "id, username, role, first_name, last_name, email, department_id, \
     hourly_rate, currency, lecturer_id, created_at, updated_at";
const MODULE_COLUMNS: &str = "id, name, description, created_at";
const ASSIGNMENT_COLUMNS: &str = "id, lecturer_id, module_id, created_at";

/// Repository for the organizational directory tables
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Departments
    // ------------------------------------------------------------------

    /// Retrieves a department by id
    pub async fn get_department(&self, id: Uuid) -> Result<DepartmentRow, DatabaseError> {
        let query = format!("SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE id = $1");
        sqlx::query_as::<_, DepartmentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| DatabaseError::not_found("Department", id))
    }

    /// Lists all departments ordered by name
    pub async fn list_departments(&self) -> Result<Vec<DepartmentRow>, DatabaseError> {
        let query = format!("SELECT {DEPARTMENT_COLUMNS} FROM departments ORDER BY name");
        sqlx::query_as::<_, DepartmentRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    /// Inserts a new department
    pub async fn insert_department(&self, department: &Department) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO departments (id, name, hourly_rate, currency, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(*department.id.as_uuid())
        .bind(&department.name)
        .bind(department.hourly_rate.amount())
        .bind(currency_token(department.hourly_rate.currency()))
        .bind(department.created_at)
        .bind(department.updated_at)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    /// Updates a department's name
    pub async fn update_department(&self, department: &Department) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE departments SET name = $2, updated_at = $3 WHERE id = $1")
            .bind(*department.id.as_uuid())
            .bind(&department.name)
            .bind(department.updated_at)
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Department", department.id));
        }
        Ok(())
    }

    /// Deletes a department, clearing the link on lecturers and users in
    /// the same transaction
    pub async fn delete_department(&self, id: Uuid) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        sqlx::query("UPDATE lecturers SET department_id = NULL WHERE department_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;
        sqlx::query("UPDATE users SET department_id = NULL WHERE department_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;

        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Department", id));
        }

        tx.commit().await.map_err(classify)?;
        Ok(())
    }

    /// Applies a new rate to the department and every linked lecturer and
    /// user, all in one transaction
    ///
    /// Returns the number of lecturer/user profiles updated.
    pub async fn cascade_rate(
        &self,
        id: Uuid,
        rate: Decimal,
        currency: &str,
    ) -> Result<u32, DatabaseError> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        let department = sqlx::query(
            "UPDATE departments SET hourly_rate = $2, currency = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(rate)
        .bind(currency)
        .execute(&mut *tx)
        .await
        .map_err(classify)?;
        if department.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Department", id));
        }

        let lecturers = sqlx::query(
            "UPDATE lecturers SET hourly_rate = $2, currency = $3, updated_at = NOW() \
             WHERE department_id = $1",
        )
        .bind(id)
        .bind(rate)
        .bind(currency)
        .execute(&mut *tx)
        .await
        .map_err(classify)?;

        let users = sqlx::query(
            "UPDATE users SET hourly_rate = $2, currency = $3, updated_at = NOW() \
             WHERE department_id = $1",
        )
        .bind(id)
        .bind(rate)
        .bind(currency)
        .execute(&mut *tx)
        .await
        .map_err(classify)?;

        tx.commit().await.map_err(classify)?;
        Ok((lecturers.rows_affected() + users.rows_affected()) as u32)
    }

    // ------------------------------------------------------------------
    // Lecturers
    // ------------------------------------------------------------------

    /// Retrieves a lecturer by id
    pub async fn get_lecturer(&self, id: Uuid) -> Result<LecturerRow, DatabaseError> {
        let query = format!("SELECT {LECTURER_COLUMNS} FROM lecturers WHERE id = $1");
        sqlx::query_as::<_, LecturerRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| DatabaseError::not_found("Lecturer", id))
    }

    /// Lists all lecturers ordered by name
    pub async fn list_lecturers(&self) -> Result<Vec<LecturerRow>, DatabaseError> {
        let query = format!("SELECT {LECTURER_COLUMNS} FROM lecturers ORDER BY name");
        sqlx::query_as::<_, LecturerRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn upsert_lecturer(
        tx: &mut Transaction<'_, Postgres>,
        lecturer: &Lecturer,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO lecturers \
                (id, name, department_id, hourly_rate, currency, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET \
                name = EXCLUDED.name, \
                department_id = EXCLUDED.department_id, \
                hourly_rate = EXCLUDED.hourly_rate, \
                currency = EXCLUDED.currency, \
                user_id = EXCLUDED.user_id, \
                updated_at = EXCLUDED.updated_at",
        )
        .bind(*lecturer.id.as_uuid())
        .bind(&lecturer.name)
        .bind(lecturer.department_id.map(|d| *d.as_uuid()))
        .bind(lecturer.hourly_rate.amount())
        .bind(currency_token(lecturer.hourly_rate.currency()))
        .bind(lecturer.user_id.map(|u| *u.as_uuid()))
        .bind(lecturer.created_at)
        .bind(lecturer.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(classify)?;
        Ok(())
    }

    /// Updates a lecturer profile
    pub async fn update_lecturer(&self, lecturer: &Lecturer) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE lecturers SET \
                name = $2, department_id = $3, hourly_rate = $4, currency = $5, \
                user_id = $6, updated_at = $7 \
             WHERE id = $1",
        )
        .bind(*lecturer.id.as_uuid())
        .bind(&lecturer.name)
        .bind(lecturer.department_id.map(|d| *d.as_uuid()))
        .bind(lecturer.hourly_rate.amount())
        .bind(currency_token(lecturer.hourly_rate.currency()))
        .bind(lecturer.user_id.map(|u| *u.as_uuid()))
        .bind(lecturer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Lecturer", lecturer.id));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Retrieves a user by id
    pub async fn get_user(&self, id: Uuid) -> Result<UserRow, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| DatabaseError::not_found("User", id))
    }

    /// Finds a user by username
    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRow>, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    /// Lists all users ordered by username
    pub async fn list_users(&self) -> Result<Vec<UserRow>, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY username");
        sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    /// Persists a user and its pairing action in one transaction
    pub async fn save_user_with_pairing(
        &self,
        user: &User,
        pairing: &PairingAction,
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        sqlx::query(
            "INSERT INTO users \
                (id, username, role, first_name, last_name, email, department_id, \
                 hourly_rate, currency, lecturer_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             ON CONFLICT (id) DO UPDATE SET \
                username = EXCLUDED.username, \
                role = EXCLUDED.role, \
                first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                email = EXCLUDED.email, \
                department_id = EXCLUDED.department_id, \
                hourly_rate = EXCLUDED.hourly_rate, \
                currency = EXCLUDED.currency, \
                lecturer_id = EXCLUDED.lecturer_id, \
                updated_at = EXCLUDED.updated_at",
        )
        .bind(*user.id.as_uuid())
        .bind(&user.username)
        .bind(user.role.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.department_id.map(|d| *d.as_uuid()))
        .bind(user.hourly_rate.map(|r| r.amount()))
        .bind(user.hourly_rate.map(|r| currency_token(r.currency())))
        .bind(user.lecturer_id.map(|l| *l.as_uuid()))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(classify)?;

        match pairing {
            PairingAction::None => {}
            PairingAction::Create(lecturer) | PairingAction::Update(lecturer) => {
                Self::upsert_lecturer(&mut tx, lecturer).await?;
            }
            PairingAction::Delete(lecturer_id) => {
                sqlx::query("DELETE FROM lecturers WHERE id = $1")
                    .bind(*lecturer_id.as_uuid())
                    .execute(&mut *tx)
                    .await
                    .map_err(classify)?;
            }
        }

        tx.commit().await.map_err(classify)?;
        Ok(())
    }

    /// Deletes a user and its linked lecturer in one transaction
    pub async fn delete_user(
        &self,
        id: Uuid,
        linked_lecturer: Option<Uuid>,
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        if let Some(lecturer_id) = linked_lecturer {
            sqlx::query("DELETE FROM lecturers WHERE id = $1")
                .bind(lecturer_id)
                .execute(&mut *tx)
                .await
                .map_err(classify)?;
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("User", id));
        }

        tx.commit().await.map_err(classify)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Modules
    // ------------------------------------------------------------------

    /// Retrieves a module by id
    pub async fn get_module(&self, id: Uuid) -> Result<ModuleRow, DatabaseError> {
        let query = format!("SELECT {MODULE_COLUMNS} FROM modules WHERE id = $1");
        sqlx::query_as::<_, ModuleRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| DatabaseError::not_found("Module", id))
    }

    /// Lists all modules ordered by name
    pub async fn list_modules(&self) -> Result<Vec<ModuleRow>, DatabaseError> {
        let query = format!("SELECT {MODULE_COLUMNS} FROM modules ORDER BY name");
        sqlx::query_as::<_, ModuleRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    /// Finds a module by name
    pub async fn find_module_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ModuleRow>, DatabaseError> {
        let query = format!("SELECT {MODULE_COLUMNS} FROM modules WHERE name = $1");
        sqlx::query_as::<_, ModuleRow>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    /// Inserts a new module
    pub async fn insert_module(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        created_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO modules (id, name, description, created_at) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(name)
            .bind(description)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(())
    }

    /// Lists all module assignments
    pub async fn list_assignments(&self) -> Result<Vec<AssignmentRow>, DatabaseError> {
        let query =
            format!("SELECT {ASSIGNMENT_COLUMNS} FROM module_assignments ORDER BY created_at");
        sqlx::query_as::<_, AssignmentRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    /// Returns true if the (lecturer, module) pair is already assigned
    pub async fn assignment_exists(
        &self,
        lecturer_id: Uuid,
        module_id: Uuid,
    ) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM module_assignments WHERE lecturer_id = $1 AND module_id = $2",
        )
        .bind(lecturer_id)
        .bind(module_id)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;
        Ok(count > 0)
    }

    /// Inserts a new module assignment
    pub async fn insert_assignment(
        &self,
        id: Uuid,
        lecturer_id: Uuid,
        module_id: Uuid,
        created_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO module_assignments (id, lecturer_id, module_id, created_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(lecturer_id)
        .bind(module_id)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    /// Deletes a module assignment
    pub async fn delete_assignment(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM module_assignments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("ModuleAssignment", id));
        }
        Ok(())
    }
}
