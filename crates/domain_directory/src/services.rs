//! Directory domain services
//!
//! [`DirectoryService`] is the HR administration surface: department CRUD
//! with the rate cascade, user CRUD with the lecturer pairing rule, and
//! module assignment. Every mutating call takes the acting principal and
//! requires the HR role.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use core_kernel::{
    ActorContext, AssignmentId, DepartmentId, LecturerId, ModuleId, Money, Role, UserId,
};

use crate::department::Department;
use crate::error::DirectoryError;
use crate::lecturer::Lecturer;
use crate::module::{Module, ModuleAssignment, MAX_DESCRIPTION_LEN};
use crate::ports::{DirectoryPort, PairingAction};
use crate::user::{NewUser, UpdateUser, User};

/// HR administration service over the organizational directory
pub struct DirectoryService {
    port: Arc<dyn DirectoryPort>,
}

impl DirectoryService {
    /// Creates a new service over the given port
    pub fn new(port: Arc<dyn DirectoryPort>) -> Self {
        Self { port }
    }

    fn require_hr(actor: &ActorContext) -> Result<(), DirectoryError> {
        if actor.has_role(Role::Hr) {
            Ok(())
        } else {
            Err(DirectoryError::Unauthorized(format!(
                "{} may not administer the directory",
                actor.role
            )))
        }
    }

    fn require_positive_rate(rate: Money) -> Result<(), DirectoryError> {
        if rate.is_positive() {
            Ok(())
        } else {
            Err(DirectoryError::Validation(
                "Hourly rate must be greater than zero".to_string(),
            ))
        }
    }

    // ------------------------------------------------------------------
    // Departments
    // ------------------------------------------------------------------

    /// Creates a department
    pub async fn create_department(
        &self,
        actor: &ActorContext,
        name: &str,
        hourly_rate: Money,
    ) -> Result<Department, DirectoryError> {
        Self::require_hr(actor)?;
        if name.trim().is_empty() {
            return Err(DirectoryError::Validation(
                "Department name is required".to_string(),
            ));
        }
        Self::require_positive_rate(hourly_rate)?;

        let department = Department::new(name.trim(), hourly_rate);
        self.port.insert_department(&department).await?;
        info!(department = %department.id, "Department created");
        Ok(department)
    }

    /// Renames a department (rate changes go through
    /// [`DirectoryService::update_department_rate`])
    pub async fn rename_department(
        &self,
        actor: &ActorContext,
        id: DepartmentId,
        name: &str,
    ) -> Result<Department, DirectoryError> {
        Self::require_hr(actor)?;
        if name.trim().is_empty() {
            return Err(DirectoryError::Validation(
                "Department name is required".to_string(),
            ));
        }
        let mut department = self.port.get_department(id).await?;
        department.rename(name.trim());
        self.port.update_department(&department).await?;
        Ok(department)
    }

    /// Changes a department's hourly rate and cascades it to every linked
    /// lecturer and user profile
    ///
    /// The cascade is one atomic port operation; claims already submitted
    /// keep their snapshot rate. Returns the number of profiles updated.
    pub async fn update_department_rate(
        &self,
        actor: &ActorContext,
        id: DepartmentId,
        new_rate: Money,
    ) -> Result<u32, DirectoryError> {
        Self::require_hr(actor)?;
        Self::require_positive_rate(new_rate)?;

        let touched = self.port.cascade_department_rate(id, new_rate).await?;
        info!(
            department = %id,
            rate = %new_rate,
            profiles = touched,
            "Department rate cascaded"
        );
        Ok(touched)
    }

    /// Deletes a department; linked lecturers and users keep their last
    /// cascaded rate with the department link cleared
    pub async fn delete_department(
        &self,
        actor: &ActorContext,
        id: DepartmentId,
    ) -> Result<(), DirectoryError> {
        Self::require_hr(actor)?;
        self.port.delete_department(id).await?;
        Ok(())
    }

    /// Retrieves a department
    pub async fn get_department(&self, id: DepartmentId) -> Result<Department, DirectoryError> {
        Ok(self.port.get_department(id).await?)
    }

    /// Lists all departments
    pub async fn list_departments(&self) -> Result<Vec<Department>, DirectoryError> {
        Ok(self.port.list_departments().await?)
    }

    // ------------------------------------------------------------------
    // Users and the lecturer pairing rule
    // ------------------------------------------------------------------

    /// Creates a user account, creating a linked lecturer profile when the
    /// role is Lecturer
    pub async fn create_user(
        &self,
        actor: &ActorContext,
        request: NewUser,
    ) -> Result<User, DirectoryError> {
        Self::require_hr(actor)?;
        request
            .validate()
            .map_err(|e| DirectoryError::Validation(e.to_string()))?;

        if self
            .port
            .find_user_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(DirectoryError::Conflict(format!(
                "Username '{}' is already taken",
                request.username
            )));
        }

        let now = chrono::Utc::now();
        let mut user = User {
            id: UserId::new_v7(),
            username: request.username,
            role: request.role,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            department_id: None,
            hourly_rate: None,
            lecturer_id: None,
            created_at: now,
            updated_at: now,
        };

        let pairing = if user.is_lecturer() {
            user.department_id = request.department_id;
            let rate = match request.hourly_rate {
                Some(rate) => {
                    Self::require_positive_rate(rate)?;
                    rate
                }
                // default the rate from the department when one is assigned
                None => match request.department_id {
                    Some(dept_id) => self.port.get_department(dept_id).await?.hourly_rate,
                    None => Money::zero(core_kernel::Currency::ZAR),
                },
            };
            user.hourly_rate = Some(rate);

            let mut lecturer = Lecturer::new(user.full_name(), rate).with_user(user.id);
            lecturer.department_id = user.department_id;
            user.lecturer_id = Some(lecturer.id);
            PairingAction::Create(lecturer)
        } else {
            PairingAction::None
        };

        self.port.save_user_with_pairing(&user, &pairing).await?;
        info!(user = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Edits a user account, keeping the lecturer pairing consistent with
    /// the (possibly changed) role
    pub async fn update_user(
        &self,
        actor: &ActorContext,
        id: UserId,
        request: UpdateUser,
    ) -> Result<User, DirectoryError> {
        Self::require_hr(actor)?;

        let mut user = self.port.get_user(id).await?;

        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        if user.is_lecturer() {
            if let Some(department_id) = request.department_id {
                user.department_id = Some(department_id);
            }
            if let Some(rate) = request.hourly_rate {
                Self::require_positive_rate(rate)?;
                user.hourly_rate = Some(rate);
            }
        }
        user.updated_at = chrono::Utc::now();

        let pairing = match (user.is_lecturer(), user.lecturer_id) {
            // role moved away from Lecturer: drop the profile and clear
            // the lecturer-only fields
            (false, Some(lecturer_id)) => {
                user.lecturer_id = None;
                user.department_id = None;
                user.hourly_rate = None;
                PairingAction::Delete(lecturer_id)
            }
            (false, None) => PairingAction::None,
            // still a lecturer: mirror the account fields onto the profile
            (true, Some(lecturer_id)) => {
                let mut lecturer = self.port.get_lecturer(lecturer_id).await?;
                lecturer.name = user.full_name();
                lecturer.department_id = user.department_id;
                if let Some(rate) = user.hourly_rate {
                    lecturer.hourly_rate = rate;
                }
                lecturer.updated_at = user.updated_at;
                PairingAction::Update(lecturer)
            }
            // role became Lecturer without a profile: create one
            (true, None) => {
                let rate = match user.hourly_rate {
                    Some(rate) => rate,
                    None => match user.department_id {
                        Some(dept_id) => self.port.get_department(dept_id).await?.hourly_rate,
                        None => Money::zero(core_kernel::Currency::ZAR),
                    },
                };
                user.hourly_rate = Some(rate);
                let mut lecturer = Lecturer::new(user.full_name(), rate).with_user(user.id);
                lecturer.department_id = user.department_id;
                user.lecturer_id = Some(lecturer.id);
                PairingAction::Create(lecturer)
            }
        };

        self.port.save_user_with_pairing(&user, &pairing).await?;
        Ok(user)
    }

    /// Deletes a user account along with its linked lecturer profile
    pub async fn delete_user(
        &self,
        actor: &ActorContext,
        id: UserId,
    ) -> Result<(), DirectoryError> {
        Self::require_hr(actor)?;
        let user = self.port.get_user(id).await?;
        self.port.delete_user(id, user.lecturer_id).await?;
        info!(user = %id, "User deleted");
        Ok(())
    }

    /// Retrieves a user
    pub async fn get_user(&self, id: UserId) -> Result<User, DirectoryError> {
        Ok(self.port.get_user(id).await?)
    }

    /// Lists all users
    pub async fn list_users(&self, actor: &ActorContext) -> Result<Vec<User>, DirectoryError> {
        Self::require_hr(actor)?;
        Ok(self.port.list_users().await?)
    }

    // ------------------------------------------------------------------
    // Lecturers
    // ------------------------------------------------------------------

    /// Retrieves a lecturer profile
    pub async fn get_lecturer(&self, id: LecturerId) -> Result<Lecturer, DirectoryError> {
        Ok(self.port.get_lecturer(id).await?)
    }

    /// Lists all lecturer profiles
    pub async fn list_lecturers(&self) -> Result<Vec<Lecturer>, DirectoryError> {
        Ok(self.port.list_lecturers().await?)
    }

    /// Overrides a lecturer's hourly rate independently of the department
    pub async fn override_lecturer_rate(
        &self,
        actor: &ActorContext,
        id: LecturerId,
        rate: Money,
    ) -> Result<Lecturer, DirectoryError> {
        Self::require_hr(actor)?;
        Self::require_positive_rate(rate)?;

        let mut lecturer = self.port.get_lecturer(id).await?;
        lecturer.hourly_rate = rate;
        lecturer.updated_at = chrono::Utc::now();
        self.port.update_lecturer(&lecturer).await?;
        Ok(lecturer)
    }

    // ------------------------------------------------------------------
    // Modules
    // ------------------------------------------------------------------

    /// Creates a module; names are unique
    pub async fn create_module(
        &self,
        actor: &ActorContext,
        name: &str,
        description: Option<String>,
    ) -> Result<Module, DirectoryError> {
        Self::require_hr(actor)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DirectoryError::Validation(
                "Module name cannot be empty".to_string(),
            ));
        }
        if let Some(ref description) = description {
            if description.len() > MAX_DESCRIPTION_LEN {
                return Err(DirectoryError::Validation(format!(
                    "Module description is limited to {MAX_DESCRIPTION_LEN} characters"
                )));
            }
        }
        if self.port.find_module_by_name(name).await?.is_some() {
            return Err(DirectoryError::Conflict(format!(
                "Module '{name}' already exists"
            )));
        }

        let module = Module::new(name, description);
        self.port.insert_module(&module).await?;
        Ok(module)
    }

    /// Lists all modules
    pub async fn list_modules(&self) -> Result<Vec<Module>, DirectoryError> {
        Ok(self.port.list_modules().await?)
    }

    /// Assigns a module to a lecturer; at most one assignment per pair
    pub async fn assign_module(
        &self,
        actor: &ActorContext,
        lecturer_id: LecturerId,
        module_id: ModuleId,
    ) -> Result<ModuleAssignment, DirectoryError> {
        Self::require_hr(actor)?;

        // both ends must exist before linking them
        self.port.get_lecturer(lecturer_id).await?;
        self.port.get_module(module_id).await?;

        if self.port.assignment_exists(lecturer_id, module_id).await? {
            return Err(DirectoryError::Conflict(
                "This module is already assigned to that lecturer".to_string(),
            ));
        }

        let assignment = ModuleAssignment::new(lecturer_id, module_id);
        self.port.insert_assignment(&assignment).await?;
        Ok(assignment)
    }

    /// Removes a module assignment
    pub async fn unassign_module(
        &self,
        actor: &ActorContext,
        id: AssignmentId,
    ) -> Result<(), DirectoryError> {
        Self::require_hr(actor)?;
        self.port.delete_assignment(id).await?;
        Ok(())
    }

    /// Lists all module assignments
    pub async fn module_assignments(&self) -> Result<Vec<ModuleAssignment>, DirectoryError> {
        Ok(self.port.list_assignments().await?)
    }
}
