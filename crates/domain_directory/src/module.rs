//! Teaching modules and their assignment to lecturers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AssignmentId, LecturerId, ModuleId};

/// Maximum length of a module description
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// A teaching module claims can be categorized under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Unique identifier
    pub id: ModuleId,
    /// Module name, unique across modules
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Module {
    /// Creates a new module
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: ModuleId::new_v7(),
            name: name.into(),
            description,
            created_at: Utc::now(),
        }
    }
}

/// Links a lecturer to a module they teach
///
/// At most one assignment exists per (lecturer, module) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleAssignment {
    /// Unique identifier
    pub id: AssignmentId,
    /// The assigned lecturer
    pub lecturer_id: LecturerId,
    /// The assigned module
    pub module_id: ModuleId,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl ModuleAssignment {
    /// Creates a new assignment
    pub fn new(lecturer_id: LecturerId, module_id: ModuleId) -> Self {
        Self {
            id: AssignmentId::new_v7(),
            lecturer_id,
            module_id,
            created_at: Utc::now(),
        }
    }
}
