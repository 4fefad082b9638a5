//! Department entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{DepartmentId, Money};

/// An academic department
///
/// The department's hourly rate is the source of truth for lecturer pay:
/// rate edits cascade to every linked lecturer and user profile. Claims
/// already submitted keep their snapshot rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier
    pub id: DepartmentId,
    /// Department name
    pub name: String,
    /// Hourly rate paid for claimed hours
    pub hourly_rate: Money,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Department {
    /// Creates a new department
    pub fn new(name: impl Into<String>, hourly_rate: Money) -> Self {
        let now = Utc::now();
        Self {
            id: DepartmentId::new_v7(),
            name: name.into(),
            hourly_rate,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a new hourly rate
    pub fn set_rate(&mut self, hourly_rate: Money) {
        self.hourly_rate = hourly_rate;
        self.updated_at = Utc::now();
    }

    /// Renames the department
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_department() {
        let dept = Department::new("Computer Science", Money::new(dec!(350), Currency::ZAR));
        assert_eq!(dept.name, "Computer Science");
        assert_eq!(dept.hourly_rate.amount(), dec!(350));
    }

    #[test]
    fn test_set_rate_touches_updated_at() {
        let mut dept = Department::new("Mathematics", Money::new(dec!(300), Currency::ZAR));
        let before = dept.updated_at;
        dept.set_rate(Money::new(dec!(320), Currency::ZAR));
        assert_eq!(dept.hourly_rate.amount(), dec!(320));
        assert!(dept.updated_at >= before);
    }
}
