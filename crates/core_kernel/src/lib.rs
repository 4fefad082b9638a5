//! Core Kernel - Foundational types for the lecturer claims system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed entity identifiers
//! - The actor/role model passed into every workflow operation

pub mod money;
pub mod identifiers;
pub mod actor;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{
    ClaimId, LecturerId, DepartmentId, UserId, ModuleId, AssignmentId,
};
pub use actor::{ActorContext, Role};
pub use error::CoreError;
pub use ports::{PortError, DomainPort};
