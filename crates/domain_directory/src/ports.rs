//! Directory domain ports
//!
//! [`DirectoryPort`] defines every operation the directory domain needs from
//! its data source. The PostgreSQL adapter lives in `infra_db`; an in-memory
//! mock lives here for tests.
//!
//! Two operations are deliberately coarser than plain CRUD because they must
//! be atomic from the caller's perspective:
//!
//! - [`DirectoryPort::cascade_department_rate`] writes the department and
//!   every linked lecturer/user profile in one transaction, so a
//!   half-applied cascade is never observable.
//! - [`DirectoryPort::save_user_with_pairing`] persists a user together with
//!   the lecturer-profile consequence of its role (create/update/delete), so
//!   a user is never left referencing a missing profile.

use async_trait::async_trait;

use core_kernel::{
    AssignmentId, DepartmentId, DomainPort, LecturerId, ModuleId, Money, PortError, UserId,
};

use crate::department::Department;
use crate::lecturer::Lecturer;
use crate::module::{Module, ModuleAssignment};
use crate::user::User;

/// The lecturer-profile consequence of saving a user
///
/// Computed by [`crate::services::DirectoryService`] from the user's role
/// and current link; applied by the adapter in the same transaction as the
/// user write.
#[derive(Debug, Clone)]
pub enum PairingAction {
    /// Role is not Lecturer and no profile is linked
    None,
    /// Role became Lecturer with no linked profile
    Create(Lecturer),
    /// Role stays Lecturer; mirror name/department/rate onto the profile
    Update(Lecturer),
    /// Role moved away from Lecturer; remove the linked profile
    Delete(LecturerId),
}

/// The main port trait for directory operations
#[async_trait]
pub trait DirectoryPort: DomainPort {
    // ------------------------------------------------------------------
    // Departments
    // ------------------------------------------------------------------

    /// Retrieves a department by ID
    async fn get_department(&self, id: DepartmentId) -> Result<Department, PortError>;

    /// Lists all departments
    async fn list_departments(&self) -> Result<Vec<Department>, PortError>;

    /// Inserts a new department
    async fn insert_department(&self, department: &Department) -> Result<(), PortError>;

    /// Updates an existing department (name only; rate changes go through
    /// the cascade)
    async fn update_department(&self, department: &Department) -> Result<(), PortError>;

    /// Deletes a department, clearing `department_id` on linked lecturers
    /// and users in the same transaction
    async fn delete_department(&self, id: DepartmentId) -> Result<(), PortError>;

    /// Applies `new_rate` to the department and overwrites the stored rate
    /// on every lecturer and user linked to it, atomically
    ///
    /// Returns the number of lecturer/user profiles updated.
    async fn cascade_department_rate(
        &self,
        id: DepartmentId,
        new_rate: Money,
    ) -> Result<u32, PortError>;

    // ------------------------------------------------------------------
    // Lecturers
    // ------------------------------------------------------------------

    /// Retrieves a lecturer by ID
    async fn get_lecturer(&self, id: LecturerId) -> Result<Lecturer, PortError>;

    /// Lists all lecturers
    async fn list_lecturers(&self) -> Result<Vec<Lecturer>, PortError>;

    /// Updates an existing lecturer profile
    async fn update_lecturer(&self, lecturer: &Lecturer) -> Result<(), PortError>;

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Retrieves a user by ID
    async fn get_user(&self, id: UserId) -> Result<User, PortError>;

    /// Finds a user by username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, PortError>;

    /// Lists all users
    async fn list_users(&self) -> Result<Vec<User>, PortError>;

    /// Persists the user and its pairing action in one transaction
    async fn save_user_with_pairing(
        &self,
        user: &User,
        pairing: &PairingAction,
    ) -> Result<(), PortError>;

    /// Deletes a user and, in the same transaction, its linked lecturer
    /// profile if any
    async fn delete_user(
        &self,
        id: UserId,
        linked_lecturer: Option<LecturerId>,
    ) -> Result<(), PortError>;

    // ------------------------------------------------------------------
    // Modules
    // ------------------------------------------------------------------

    /// Retrieves a module by ID
    async fn get_module(&self, id: ModuleId) -> Result<Module, PortError>;

    /// Lists all modules
    async fn list_modules(&self) -> Result<Vec<Module>, PortError>;

    /// Finds a module by its unique name
    async fn find_module_by_name(&self, name: &str) -> Result<Option<Module>, PortError>;

    /// Inserts a new module
    async fn insert_module(&self, module: &Module) -> Result<(), PortError>;

    /// Lists all module assignments
    async fn list_assignments(&self) -> Result<Vec<ModuleAssignment>, PortError>;

    /// Returns true if the (lecturer, module) pair is already assigned
    async fn assignment_exists(
        &self,
        lecturer_id: LecturerId,
        module_id: ModuleId,
    ) -> Result<bool, PortError>;

    /// Inserts a new module assignment
    async fn insert_assignment(&self, assignment: &ModuleAssignment) -> Result<(), PortError>;

    /// Deletes a module assignment
    async fn delete_assignment(&self, id: AssignmentId) -> Result<(), PortError>;
}

/// In-memory mock implementation of DirectoryPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock adapter storing directory data in memory
    ///
    /// A single lock guards all tables so that the multi-row operations
    /// (cascade, pairing) are as atomic here as they are in PostgreSQL.
    #[derive(Debug, Default)]
    pub struct MockDirectoryPort {
        state: Arc<RwLock<State>>,
    }

    #[derive(Debug, Default)]
    struct State {
        departments: HashMap<DepartmentId, Department>,
        lecturers: HashMap<LecturerId, Lecturer>,
        users: HashMap<UserId, User>,
        modules: HashMap<ModuleId, Module>,
        assignments: HashMap<AssignmentId, ModuleAssignment>,
    }

    impl MockDirectoryPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates a lecturer for test setup
        pub async fn seed_lecturer(&self, lecturer: Lecturer) {
            self.state
                .write()
                .await
                .lecturers
                .insert(lecturer.id, lecturer);
        }

        /// Pre-populates a department for test setup
        pub async fn seed_department(&self, department: Department) {
            self.state
                .write()
                .await
                .departments
                .insert(department.id, department);
        }
    }

    impl DomainPort for MockDirectoryPort {}

    #[async_trait]
    impl DirectoryPort for MockDirectoryPort {
        async fn get_department(&self, id: DepartmentId) -> Result<Department, PortError> {
            self.state
                .read()
                .await
                .departments
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Department", id))
        }

        async fn list_departments(&self) -> Result<Vec<Department>, PortError> {
            let mut departments: Vec<_> =
                self.state.read().await.departments.values().cloned().collect();
            departments.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(departments)
        }

        async fn insert_department(&self, department: &Department) -> Result<(), PortError> {
            self.state
                .write()
                .await
                .departments
                .insert(department.id, department.clone());
            Ok(())
        }

        async fn update_department(&self, department: &Department) -> Result<(), PortError> {
            let mut state = self.state.write().await;
            if !state.departments.contains_key(&department.id) {
                return Err(PortError::not_found("Department", department.id));
            }
            state.departments.insert(department.id, department.clone());
            Ok(())
        }

        async fn delete_department(&self, id: DepartmentId) -> Result<(), PortError> {
            let mut state = self.state.write().await;
            state
                .departments
                .remove(&id)
                .ok_or_else(|| PortError::not_found("Department", id))?;
            for lecturer in state.lecturers.values_mut() {
                if lecturer.department_id == Some(id) {
                    lecturer.department_id = None;
                }
            }
            for user in state.users.values_mut() {
                if user.department_id == Some(id) {
                    user.department_id = None;
                }
            }
            Ok(())
        }

        async fn cascade_department_rate(
            &self,
            id: DepartmentId,
            new_rate: Money,
        ) -> Result<u32, PortError> {
            let mut state = self.state.write().await;
            let department = state
                .departments
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Department", id))?;
            department.set_rate(new_rate);

            let mut touched = 0u32;
            for lecturer in state.lecturers.values_mut() {
                if lecturer.department_id == Some(id) {
                    lecturer.hourly_rate = new_rate;
                    touched += 1;
                }
            }
            for user in state.users.values_mut() {
                if user.department_id == Some(id) {
                    user.hourly_rate = Some(new_rate);
                    touched += 1;
                }
            }
            Ok(touched)
        }

        async fn get_lecturer(&self, id: LecturerId) -> Result<Lecturer, PortError> {
            self.state
                .read()
                .await
                .lecturers
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Lecturer", id))
        }

        async fn list_lecturers(&self) -> Result<Vec<Lecturer>, PortError> {
            let mut lecturers: Vec<_> =
                self.state.read().await.lecturers.values().cloned().collect();
            lecturers.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(lecturers)
        }

        async fn update_lecturer(&self, lecturer: &Lecturer) -> Result<(), PortError> {
            let mut state = self.state.write().await;
            if !state.lecturers.contains_key(&lecturer.id) {
                return Err(PortError::not_found("Lecturer", lecturer.id));
            }
            state.lecturers.insert(lecturer.id, lecturer.clone());
            Ok(())
        }

        async fn get_user(&self, id: UserId) -> Result<User, PortError> {
            self.state
                .read()
                .await
                .users
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("User", id))
        }

        async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, PortError> {
            Ok(self
                .state
                .read()
                .await
                .users
                .values()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn list_users(&self) -> Result<Vec<User>, PortError> {
            let mut users: Vec<_> = self.state.read().await.users.values().cloned().collect();
            users.sort_by(|a, b| a.username.cmp(&b.username));
            Ok(users)
        }

        async fn save_user_with_pairing(
            &self,
            user: &User,
            pairing: &PairingAction,
        ) -> Result<(), PortError> {
            let mut state = self.state.write().await;
            state.users.insert(user.id, user.clone());
            match pairing {
                PairingAction::None => {}
                PairingAction::Create(lecturer) | PairingAction::Update(lecturer) => {
                    state.lecturers.insert(lecturer.id, lecturer.clone());
                }
                PairingAction::Delete(lecturer_id) => {
                    state.lecturers.remove(lecturer_id);
                }
            }
            Ok(())
        }

        async fn delete_user(
            &self,
            id: UserId,
            linked_lecturer: Option<LecturerId>,
        ) -> Result<(), PortError> {
            let mut state = self.state.write().await;
            state
                .users
                .remove(&id)
                .ok_or_else(|| PortError::not_found("User", id))?;
            if let Some(lecturer_id) = linked_lecturer {
                state.lecturers.remove(&lecturer_id);
            }
            Ok(())
        }

        async fn get_module(&self, id: ModuleId) -> Result<Module, PortError> {
            self.state
                .read()
                .await
                .modules
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Module", id))
        }

        async fn list_modules(&self) -> Result<Vec<Module>, PortError> {
            let mut modules: Vec<_> = self.state.read().await.modules.values().cloned().collect();
            modules.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(modules)
        }

        async fn find_module_by_name(&self, name: &str) -> Result<Option<Module>, PortError> {
            Ok(self
                .state
                .read()
                .await
                .modules
                .values()
                .find(|m| m.name == name)
                .cloned())
        }

        async fn insert_module(&self, module: &Module) -> Result<(), PortError> {
            self.state
                .write()
                .await
                .modules
                .insert(module.id, module.clone());
            Ok(())
        }

        async fn list_assignments(&self) -> Result<Vec<ModuleAssignment>, PortError> {
            let mut assignments: Vec<_> =
                self.state.read().await.assignments.values().cloned().collect();
            assignments.sort_by_key(|a| a.created_at);
            Ok(assignments)
        }

        async fn assignment_exists(
            &self,
            lecturer_id: LecturerId,
            module_id: ModuleId,
        ) -> Result<bool, PortError> {
            Ok(self
                .state
                .read()
                .await
                .assignments
                .values()
                .any(|a| a.lecturer_id == lecturer_id && a.module_id == module_id))
        }

        async fn insert_assignment(&self, assignment: &ModuleAssignment) -> Result<(), PortError> {
            self.state
                .write()
                .await
                .assignments
                .insert(assignment.id, assignment.clone());
            Ok(())
        }

        async fn delete_assignment(&self, id: AssignmentId) -> Result<(), PortError> {
            self.state
                .write()
                .await
                .assignments
                .remove(&id)
                .ok_or_else(|| PortError::not_found("ModuleAssignment", id))?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockDirectoryPort;
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn rate(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::ZAR)
    }

    #[tokio::test]
    async fn test_mock_department_round_trip() {
        let port = MockDirectoryPort::new();
        let dept = Department::new("Physics", rate(dec!(400)));

        port.insert_department(&dept).await.unwrap();
        let loaded = port.get_department(dept.id).await.unwrap();
        assert_eq!(loaded.name, "Physics");
    }

    #[tokio::test]
    async fn test_mock_cascade_touches_only_linked_profiles() {
        let port = MockDirectoryPort::new();
        let dept = Department::new("Physics", rate(dec!(400)));
        let other = Department::new("History", rate(dec!(250)));
        port.insert_department(&dept).await.unwrap();
        port.insert_department(&other).await.unwrap();

        let linked = Lecturer::new("Ada Mokoena", rate(dec!(400))).with_department(dept.id);
        let unlinked = Lecturer::new("Ben Dlamini", rate(dec!(250))).with_department(other.id);
        port.seed_lecturer(linked.clone()).await;
        port.seed_lecturer(unlinked.clone()).await;

        let touched = port
            .cascade_department_rate(dept.id, rate(dec!(500)))
            .await
            .unwrap();
        assert_eq!(touched, 1);

        assert_eq!(
            port.get_lecturer(linked.id).await.unwrap().hourly_rate.amount(),
            dec!(500)
        );
        assert_eq!(
            port.get_lecturer(unlinked.id).await.unwrap().hourly_rate.amount(),
            dec!(250)
        );
    }

    #[tokio::test]
    async fn test_mock_cascade_unknown_department() {
        let port = MockDirectoryPort::new();
        let result = port
            .cascade_department_rate(DepartmentId::new(), rate(dec!(500)))
            .await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_delete_department_clears_links() {
        let port = MockDirectoryPort::new();
        let dept = Department::new("Physics", rate(dec!(400)));
        port.insert_department(&dept).await.unwrap();
        let lecturer = Lecturer::new("Ada Mokoena", rate(dec!(400))).with_department(dept.id);
        port.seed_lecturer(lecturer.clone()).await;

        port.delete_department(dept.id).await.unwrap();

        let loaded = port.get_lecturer(lecturer.id).await.unwrap();
        assert!(loaded.department_id.is_none());
        // rate is retained after the department goes away
        assert_eq!(loaded.hourly_rate.amount(), dec!(400));
    }
}
