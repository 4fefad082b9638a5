//! Infrastructure database layer
//!
//! PostgreSQL persistence for the claims system, implementing the domain
//! port traits over SQLx repositories. Multi-row invariants (the department
//! rate cascade, the user/lecturer pairing) run inside a single transaction
//! so a half-applied write is never observable.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, adapters::PgClaimsAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims")).await?;
//! let claims = PgClaimsAdapter::new(pool.clone());
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;
pub mod rows;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
