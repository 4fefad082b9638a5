//! Wired-up services over the in-memory mock ports
//!
//! [`TestHarness`] assembles the directory and claim services against a
//! shared mock directory, bridged the same way the PostgreSQL adapters
//! bridge them in production: the claim engine reads lecturer snapshots
//! through a narrow port backed by the directory store.

use std::sync::Arc;

use async_trait::async_trait;

use core_kernel::{DomainPort, LecturerId, PortError};
use domain_claims::ports::mock::MockClaimsPort;
use domain_claims::{ClaimService, LecturerProfilePort, LecturerSnapshot};
use domain_directory::ports::mock::MockDirectoryPort;
use domain_directory::DirectoryService;

/// Snapshot port backed by the mock directory store
///
/// Mirrors the production join of lecturer and department rows.
pub struct DirectorySnapshotBridge {
    directory: Arc<MockDirectoryPort>,
}

impl DirectorySnapshotBridge {
    /// Creates a bridge over the given directory store
    pub fn new(directory: Arc<MockDirectoryPort>) -> Self {
        Self { directory }
    }
}

impl DomainPort for DirectorySnapshotBridge {}

#[async_trait]
impl LecturerProfilePort for DirectorySnapshotBridge {
    async fn get_snapshot(&self, id: LecturerId) -> Result<LecturerSnapshot, PortError> {
        use domain_directory::DirectoryPort;

        let lecturer = self.directory.get_lecturer(id).await?;
        let department = match lecturer.department_id {
            Some(department_id) => Some(self.directory.get_department(department_id).await?.name),
            None => None,
        };

        Ok(LecturerSnapshot {
            lecturer_id: lecturer.id,
            name: lecturer.name,
            department,
            hourly_rate: lecturer.hourly_rate,
        })
    }
}

/// Both domain services wired over shared in-memory stores
pub struct TestHarness {
    pub directory: DirectoryService,
    pub claims: ClaimService,
    pub directory_port: Arc<MockDirectoryPort>,
    pub claims_port: Arc<MockClaimsPort>,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Creates a fresh harness with empty stores
    pub fn new() -> Self {
        let directory_port = Arc::new(MockDirectoryPort::new());
        let claims_port = Arc::new(MockClaimsPort::new());
        let bridge = Arc::new(DirectorySnapshotBridge::new(directory_port.clone()));

        Self {
            directory: DirectoryService::new(directory_port.clone()),
            claims: ClaimService::new(claims_port.clone(), bridge),
            directory_port,
            claims_port,
        }
    }
}
