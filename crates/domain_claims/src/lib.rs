//! Claim Lifecycle domain
//!
//! The core of the system: the monthly claim aggregate and its approval
//! state machine. A claim moves through two independent authorities,
//! the Coordinator and then the Manager, encoded as a
//! (CoordinatorStatus, ManagerStatus) pair with exactly five reachable
//! combinations. The display status, like the claim amount, is always
//! derived, never stored as authoritative.

pub mod claim;
pub mod document;
pub mod error;
pub mod ports;
pub mod reporting;
pub mod service;

pub use claim::{
    Claim, ClaimStatus, ClaimSubmission, CoordinatorStatus, ManagerStatus, MAX_HOURS, MIN_HOURS,
};
pub use document::{DocumentStorePort, SupportingDocument, ALLOWED_EXTENSIONS, MAX_DOCUMENT_BYTES};
pub use error::ClaimError;
pub use ports::{ClaimsPort, LecturerProfilePort, LecturerSnapshot};
pub use reporting::{ApprovedClaimsReport, DepartmentTotals};
pub use service::ClaimService;
