//! Organizational Directory domain
//!
//! Reference data the claim workflow reads and HR administers: departments
//! (the source of truth for hourly rates), lecturer profiles, user accounts,
//! and teaching modules. The two rules with real behavior live here:
//!
//! - **Rate cascade**: editing a department's hourly rate propagates the new
//!   rate to every linked lecturer and user in one transaction.
//! - **User/Lecturer pairing**: a user with the Lecturer role always has
//!   exactly one linked lecturer profile, created, mirrored, and destroyed
//!   alongside role changes.

pub mod department;
pub mod lecturer;
pub mod user;
pub mod module;
pub mod error;
pub mod ports;
pub mod services;

pub use department::Department;
pub use lecturer::Lecturer;
pub use user::{User, NewUser, UpdateUser};
pub use module::{Module, ModuleAssignment};
pub use error::DirectoryError;
pub use ports::{DirectoryPort, PairingAction};
pub use services::DirectoryService;
