//! Repository implementations

pub mod claims;
pub mod directory;

pub use claims::ClaimsRepository;
pub use directory::DirectoryRepository;
