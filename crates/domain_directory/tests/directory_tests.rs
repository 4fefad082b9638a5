//! Service-level tests for the organizational directory

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{ActorContext, Currency, Money, Role, UserId};
use domain_directory::ports::mock::MockDirectoryPort;
use domain_directory::{DirectoryError, DirectoryService, NewUser, UpdateUser};

fn zar(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::ZAR)
}

fn hr() -> ActorContext {
    ActorContext::staff("hr.admin", UserId::new(), Role::Hr)
}

fn service() -> (DirectoryService, Arc<MockDirectoryPort>) {
    let port = Arc::new(MockDirectoryPort::new());
    (DirectoryService::new(port.clone()), port)
}

fn new_lecturer_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        role: Role::Lecturer,
        first_name: "Thandi".to_string(),
        last_name: "Nkosi".to_string(),
        email: format!("{username}@example.ac.za"),
        department_id: None,
        hourly_rate: Some(zar(dec!(350))),
    }
}

// ============================================================================
// Rate cascade
// ============================================================================

mod cascade_tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_cascade_updates_all_linked_profiles() {
        let (service, _port) = service();
        let hr = hr();

        let dept = service
            .create_department(&hr, "Computer Science", zar(dec!(350)))
            .await
            .unwrap();

        let mut request = new_lecturer_user("ada");
        request.department_id = Some(dept.id);
        request.hourly_rate = None;
        let ada = service.create_user(&hr, request).await.unwrap();

        let mut request = new_lecturer_user("ben");
        request.department_id = Some(dept.id);
        request.hourly_rate = None;
        let ben = service.create_user(&hr, request).await.unwrap();

        // one department + two lecturers + two user accounts
        let touched = service
            .update_department_rate(&hr, dept.id, zar(dec!(500)))
            .await
            .unwrap();
        assert_eq!(touched, 4);

        for user in [&ada, &ben] {
            let reloaded = service.get_user(user.id).await.unwrap();
            assert_eq!(reloaded.hourly_rate.unwrap().amount(), dec!(500));

            let lecturer = service
                .get_lecturer(user.lecturer_id.unwrap())
                .await
                .unwrap();
            assert_eq!(lecturer.hourly_rate.amount(), dec!(500));
        }

        let reloaded = service.get_department(dept.id).await.unwrap();
        assert_eq!(reloaded.hourly_rate.amount(), dec!(500));
    }

    #[tokio::test]
    async fn test_rate_cascade_rejects_non_positive_rate() {
        let (service, _port) = service();
        let hr = hr();
        let dept = service
            .create_department(&hr, "Mathematics", zar(dec!(300)))
            .await
            .unwrap();

        let result = service
            .update_department_rate(&hr, dept.id, zar(dec!(0)))
            .await;
        assert!(matches!(result, Err(DirectoryError::Validation(_))));

        // nothing was persisted
        let reloaded = service.get_department(dept.id).await.unwrap();
        assert_eq!(reloaded.hourly_rate.amount(), dec!(300));
    }

    #[tokio::test]
    async fn test_rate_cascade_unknown_department_is_not_found() {
        let (service, _port) = service();
        let result = service
            .update_department_rate(&hr(), core_kernel::DepartmentId::new(), zar(dec!(500)))
            .await;
        assert!(matches!(result, Err(DirectoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rate_cascade_requires_hr_role() {
        let (service, _port) = service();
        let manager = ActorContext::staff("mbrown", UserId::new(), Role::Manager);
        let result = service
            .update_department_rate(&manager, core_kernel::DepartmentId::new(), zar(dec!(500)))
            .await;
        assert!(matches!(result, Err(DirectoryError::Unauthorized(_))));
    }
}

// ============================================================================
// User / Lecturer pairing
// ============================================================================

mod pairing_tests {
    use super::*;

    #[tokio::test]
    async fn test_creating_lecturer_user_creates_linked_profile() {
        let (service, _port) = service();
        let user = service
            .create_user(&hr(), new_lecturer_user("tnkosi"))
            .await
            .unwrap();

        let lecturer_id = user.lecturer_id.expect("profile should be linked");
        let lecturer = service.get_lecturer(lecturer_id).await.unwrap();
        assert_eq!(lecturer.name, "Thandi Nkosi");
        assert_eq!(lecturer.hourly_rate.amount(), dec!(350));
        assert_eq!(lecturer.user_id, Some(user.id));
    }

    #[tokio::test]
    async fn test_creating_non_lecturer_user_creates_no_profile() {
        let (service, _port) = service();
        let mut request = new_lecturer_user("coord");
        request.role = Role::Coordinator;
        let user = service.create_user(&hr(), request).await.unwrap();

        assert!(user.lecturer_id.is_none());
        assert!(user.department_id.is_none());
        assert!(user.hourly_rate.is_none());
        assert!(service.list_lecturers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_role_change_away_from_lecturer_deletes_profile() {
        let (service, _port) = service();
        let hr = hr();
        let user = service
            .create_user(&hr, new_lecturer_user("tnkosi"))
            .await
            .unwrap();
        let lecturer_id = user.lecturer_id.unwrap();

        let updated = service
            .update_user(
                &hr,
                user.id,
                UpdateUser {
                    role: Some(Role::Hr),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.lecturer_id.is_none());
        assert!(updated.department_id.is_none());
        assert!(updated.hourly_rate.is_none());
        assert!(matches!(
            service.get_lecturer(lecturer_id).await,
            Err(DirectoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_editing_lecturer_user_updates_not_duplicates_profile() {
        let (service, _port) = service();
        let hr = hr();
        let user = service
            .create_user(&hr, new_lecturer_user("tnkosi"))
            .await
            .unwrap();

        service
            .update_user(
                &hr,
                user.id,
                UpdateUser {
                    last_name: Some("Dlamini".to_string()),
                    hourly_rate: Some(zar(dec!(420))),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let lecturers = service.list_lecturers().await.unwrap();
        assert_eq!(lecturers.len(), 1);
        assert_eq!(lecturers[0].name, "Thandi Dlamini");
        assert_eq!(lecturers[0].hourly_rate.amount(), dec!(420));
    }

    #[tokio::test]
    async fn test_role_change_to_lecturer_creates_profile() {
        let (service, _port) = service();
        let hr = hr();
        let mut request = new_lecturer_user("coord");
        request.role = Role::Coordinator;
        let user = service.create_user(&hr, request).await.unwrap();

        let updated = service
            .update_user(
                &hr,
                user.id,
                UpdateUser {
                    role: Some(Role::Lecturer),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let lecturer = service
            .get_lecturer(updated.lecturer_id.expect("profile created"))
            .await
            .unwrap();
        assert_eq!(lecturer.user_id, Some(user.id));
    }

    #[tokio::test]
    async fn test_deleting_user_removes_linked_profile() {
        let (service, _port) = service();
        let hr = hr();
        let user = service
            .create_user(&hr, new_lecturer_user("tnkosi"))
            .await
            .unwrap();
        let lecturer_id = user.lecturer_id.unwrap();

        service.delete_user(&hr, user.id).await.unwrap();

        assert!(matches!(
            service.get_user(user.id).await,
            Err(DirectoryError::NotFound(_))
        ));
        assert!(matches!(
            service.get_lecturer(lecturer_id).await,
            Err(DirectoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_conflict() {
        let (service, _port) = service();
        let hr = hr();
        service
            .create_user(&hr, new_lecturer_user("tnkosi"))
            .await
            .unwrap();

        let result = service.create_user(&hr, new_lecturer_user("tnkosi")).await;
        assert!(matches!(result, Err(DirectoryError::Conflict(_))));
    }
}

// ============================================================================
// Module administration
// ============================================================================

mod module_tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_module_name_is_a_conflict() {
        let (service, _port) = service();
        let hr = hr();
        service
            .create_module(&hr, "Programming 101", None)
            .await
            .unwrap();

        let result = service.create_module(&hr, "Programming 101", None).await;
        assert!(matches!(result, Err(DirectoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_blank_module_name_is_rejected() {
        let (service, _port) = service();
        let result = service.create_module(&hr(), "   ", None).await;
        assert!(matches!(result, Err(DirectoryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_assignment_is_unique_per_pair() {
        let (service, _port) = service();
        let hr = hr();
        let user = service
            .create_user(&hr, new_lecturer_user("tnkosi"))
            .await
            .unwrap();
        let lecturer_id = user.lecturer_id.unwrap();
        let module = service
            .create_module(&hr, "Programming 101", None)
            .await
            .unwrap();

        service
            .assign_module(&hr, lecturer_id, module.id)
            .await
            .unwrap();
        let result = service.assign_module(&hr, lecturer_id, module.id).await;
        assert!(matches!(result, Err(DirectoryError::Conflict(_))));

        assert_eq!(service.module_assignments().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_assignment_requires_existing_lecturer_and_module() {
        let (service, _port) = service();
        let hr = hr();
        let module = service
            .create_module(&hr, "Programming 101", None)
            .await
            .unwrap();

        let result = service
            .assign_module(&hr, core_kernel::LecturerId::new(), module.id)
            .await;
        assert!(matches!(result, Err(DirectoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unassign_then_reassign() {
        let (service, _port) = service();
        let hr = hr();
        let user = service
            .create_user(&hr, new_lecturer_user("tnkosi"))
            .await
            .unwrap();
        let lecturer_id = user.lecturer_id.unwrap();
        let module = service
            .create_module(&hr, "Programming 101", None)
            .await
            .unwrap();

        let assignment = service
            .assign_module(&hr, lecturer_id, module.id)
            .await
            .unwrap();
        service.unassign_module(&hr, assignment.id).await.unwrap();
        assert!(service.module_assignments().await.unwrap().is_empty());

        // pair is free again after unassignment
        service
            .assign_module(&hr, lecturer_id, module.id)
            .await
            .unwrap();
    }
}
