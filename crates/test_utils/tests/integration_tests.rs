//! Cross-domain integration tests
//!
//! End-to-end scenarios spanning the directory and claim domains, wired the
//! way the production adapters wire them.

use rust_decimal_macros::dec;

use core_kernel::{ActorContext, Currency, Money, Role, UserId};
use domain_claims::document::mock::MockDocumentStore;
use domain_claims::{ClaimError, ClaimStatus, ClaimSubmission, DocumentStorePort};
use domain_directory::UpdateUser;
use test_utils::{ActorFixtures, MoneyFixtures, NewUserBuilder, StringFixtures, TestHarness};
use test_utils::{assert_amount_invariant, assert_status_pair_legal};

fn zar(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::ZAR)
}

fn submission(hours: u32) -> ClaimSubmission {
    ClaimSubmission {
        month: StringFixtures::month().to_string(),
        hours_worked: hours,
        notes: None,
        document: None,
    }
}

/// Creates a department and a lecturer user inside it, returning the
/// lecturer's actor context
async fn onboard_lecturer(harness: &TestHarness, username: &str) -> ActorContext {
    let hr = ActorFixtures::hr();
    let department = harness
        .directory
        .create_department(&hr, StringFixtures::department(), MoneyFixtures::standard_rate())
        .await
        .unwrap();

    let user = harness
        .directory
        .create_user(
            &hr,
            NewUserBuilder::new()
                .with_username(username)
                .with_department(department.id)
                .with_department_rate()
                .build(),
        )
        .await
        .unwrap();

    ActorContext::lecturer(username, user.id, user.lecturer_id.unwrap())
}

mod submit_to_payout {
    use super::*;

    #[tokio::test]
    async fn test_full_workflow_submit_verify_approve_report() {
        let harness = TestHarness::new();
        let lecturer = onboard_lecturer(&harness, "tnkosi").await;
        let coordinator = ActorFixtures::coordinator();
        let manager = ActorFixtures::manager();

        let claim = harness
            .claims
            .submit(&lecturer, submission(160))
            .await
            .unwrap();
        assert_eq!(claim.status().unwrap(), ClaimStatus::PendingVerification);
        assert_eq!(claim.department_name, StringFixtures::department());
        assert_amount_invariant(&claim);

        harness
            .claims
            .coordinator_approve(&coordinator, claim.id)
            .await
            .unwrap();
        let approved = harness
            .claims
            .manager_approve(&manager, claim.id)
            .await
            .unwrap();

        assert_eq!(approved.status().unwrap(), ClaimStatus::FullyApproved);
        assert_eq!(approved.coordinator_id.as_deref(), Some("coordinator"));
        assert_eq!(approved.manager_id.as_deref(), Some("manager"));
        assert_status_pair_legal(&approved);

        let report = harness.claims.report(&manager).await.unwrap();
        assert_eq!(report.total_claims, 1);
        assert_eq!(report.total_hours, 160);
        // 160 hours at the standard R350 rate
        assert_eq!(report.total_payout.amount(), dec!(56000));
        assert_eq!(
            report.by_department[0].department,
            StringFixtures::department()
        );
    }

    #[tokio::test]
    async fn test_submission_with_stored_document() {
        let harness = TestHarness::new();
        let lecturer = onboard_lecturer(&harness, "tnkosi").await;

        let store = MockDocumentStore::new();
        let document = store
            .store(b"timesheet bytes", "july_timesheet.pdf")
            .await
            .unwrap();

        let mut submission = submission(80);
        submission.document = Some(document.clone());
        let claim = harness.claims.submit(&lecturer, submission).await.unwrap();

        let stored = claim.supporting_document.unwrap();
        assert_eq!(stored.original_name, "july_timesheet.pdf");
        assert_eq!(stored.path, document.path);
    }
}

mod rate_cascade_and_snapshots {
    use super::*;

    #[tokio::test]
    async fn test_cascade_changes_profiles_but_not_existing_claims() {
        let harness = TestHarness::new();
        let hr = ActorFixtures::hr();
        let lecturer = onboard_lecturer(&harness, "tnkosi").await;

        let before = harness
            .claims
            .submit(&lecturer, submission(100))
            .await
            .unwrap();
        assert_eq!(before.hourly_rate.amount(), dec!(350));

        let departments = harness.directory.list_departments().await.unwrap();
        let touched = harness
            .directory
            .update_department_rate(&hr, departments[0].id, MoneyFixtures::raised_rate())
            .await
            .unwrap();
        // one lecturer profile and one user account
        assert_eq!(touched, 2);

        // the lecturer's profile now carries the new rate
        let profile = harness
            .directory
            .get_lecturer(lecturer.lecturer_id.unwrap())
            .await
            .unwrap();
        assert_eq!(profile.hourly_rate.amount(), dec!(500));

        // the submitted claim keeps its snapshot
        let reloaded = harness
            .claims
            .get_claim(&lecturer, before.id)
            .await
            .unwrap();
        assert_eq!(reloaded.hourly_rate.amount(), dec!(350));
        assert_eq!(reloaded.amount().amount(), dec!(35000));

        // a claim submitted after the cascade uses the new rate
        let after = harness
            .claims
            .submit(&lecturer, submission(100))
            .await
            .unwrap();
        assert_eq!(after.hourly_rate.amount(), dec!(500));
        assert_eq!(after.amount().amount(), dec!(50000));
    }

    #[tokio::test]
    async fn test_cascade_rejects_zero_rate_without_touching_anything() {
        let harness = TestHarness::new();
        let hr = ActorFixtures::hr();
        onboard_lecturer(&harness, "tnkosi").await;

        let departments = harness.directory.list_departments().await.unwrap();
        let result = harness
            .directory
            .update_department_rate(&hr, departments[0].id, zar(dec!(0)))
            .await;
        assert!(result.is_err());

        let lecturers = harness.directory.list_lecturers().await.unwrap();
        assert_eq!(lecturers[0].hourly_rate.amount(), dec!(350));
    }
}

mod pairing_and_claims {
    use super::*;

    #[tokio::test]
    async fn test_role_change_removes_profile_but_keeps_claims() {
        let harness = TestHarness::new();
        let hr = ActorFixtures::hr();
        let lecturer = onboard_lecturer(&harness, "tnkosi").await;

        let claim = harness
            .claims
            .submit(&lecturer, submission(90))
            .await
            .unwrap();

        // HR moves the account out of the Lecturer role
        harness
            .directory
            .update_user(
                &hr,
                lecturer.user_id,
                UpdateUser {
                    role: Some(Role::Hr),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // the profile is gone, so new submissions fail
        let result = harness.claims.submit(&lecturer, submission(10)).await;
        assert!(matches!(result, Err(ClaimError::NotFound(_))));

        // but the already-submitted claim is still intact for audit
        let kept = harness.claims.get_claim(&lecturer, claim.id).await.unwrap();
        assert_eq!(kept.lecturer_name, "Thandi Nkosi");
        assert_amount_invariant(&kept);
    }

    #[tokio::test]
    async fn test_deleting_department_blocks_new_submissions() {
        let harness = TestHarness::new();
        let hr = ActorFixtures::hr();
        let lecturer = onboard_lecturer(&harness, "tnkosi").await;

        let departments = harness.directory.list_departments().await.unwrap();
        harness
            .directory
            .delete_department(&hr, departments[0].id)
            .await
            .unwrap();

        // no department on the profile any more: submission is blocked
        let result = harness.claims.submit(&lecturer, submission(10)).await;
        assert!(matches!(result, Err(ClaimError::Validation(_))));
    }
}

mod soft_delete_audit {
    use super::*;

    #[tokio::test]
    async fn test_deleted_claims_stay_out_of_reports() {
        let harness = TestHarness::new();
        let lecturer = onboard_lecturer(&harness, "tnkosi").await;
        let coordinator = ActorFixtures::coordinator();
        let manager = ActorFixtures::manager();

        let keep = harness
            .claims
            .submit(&lecturer, submission(100))
            .await
            .unwrap();
        let drop = harness
            .claims
            .submit(&lecturer, submission(50))
            .await
            .unwrap();

        for claim_id in [keep.id, drop.id] {
            harness
                .claims
                .coordinator_approve(&coordinator, claim_id)
                .await
                .unwrap();
            harness
                .claims
                .manager_approve(&manager, claim_id)
                .await
                .unwrap();
        }

        harness.claims.soft_delete(&manager, drop.id).await.unwrap();

        let report = harness.claims.report(&manager).await.unwrap();
        assert_eq!(report.total_claims, 1);
        assert_eq!(report.total_hours, 100);

        // the deleted record remains for audit, workflow fields untouched
        let audit = harness.claims.get_claim(&manager, drop.id).await.unwrap();
        assert!(audit.is_deleted);
        assert_eq!(audit.status().unwrap(), ClaimStatus::FullyApproved);
    }
}

mod authorization_matrix {
    use super::*;

    #[tokio::test]
    async fn test_every_transition_is_role_gated() {
        let harness = TestHarness::new();
        let lecturer = onboard_lecturer(&harness, "tnkosi").await;
        let coordinator = ActorFixtures::coordinator();
        let manager = ActorFixtures::manager();
        let hr = ActorFixtures::hr();

        let claim = harness
            .claims
            .submit(&lecturer, submission(100))
            .await
            .unwrap();

        // wrong-role calls across the matrix
        assert!(harness.claims.submit(&hr, submission(10)).await.is_err());
        assert!(harness
            .claims
            .coordinator_approve(&manager, claim.id)
            .await
            .is_err());
        assert!(harness
            .claims
            .manager_approve(&coordinator, claim.id)
            .await
            .is_err());
        assert!(harness.claims.verify_queue(&lecturer).await.is_err());
        assert!(harness.claims.approval_queue(&coordinator).await.is_err());
        assert!(harness.claims.all_claims(&manager).await.is_err());
        assert!(harness
            .directory
            .create_department(&manager, "X", MoneyFixtures::standard_rate())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_staff_accounts_never_gain_lecturer_queues() {
        let harness = TestHarness::new();
        let hr = ActorFixtures::hr();
        harness
            .directory
            .create_user(
                &hr,
                NewUserBuilder::new()
                    .with_username("coord")
                    .with_role(Role::Coordinator)
                    .build(),
            )
            .await
            .unwrap();

        let coordinator = ActorContext::staff("coord", UserId::new(), Role::Coordinator);
        assert!(harness.claims.my_claims(&coordinator).await.is_err());
    }
}
