//! Pre-built test data
//!
//! Fixed values for tests that only need a plausible entity, not a
//! particular one.

use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

use core_kernel::{ActorContext, Currency, LecturerId, Money, Role, UserId};

/// Money values used across the suite
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A typical junior-lecturer hourly rate
    pub fn standard_rate() -> Money {
        Money::new(dec!(350), Currency::ZAR)
    }

    /// A typical senior-lecturer hourly rate
    pub fn senior_rate() -> Money {
        Money::new(dec!(420), Currency::ZAR)
    }

    /// The rate used after a department-wide increase
    pub fn raised_rate() -> Money {
        Money::new(dec!(500), Currency::ZAR)
    }
}

/// Period labels in the format the original forms submit
pub static MONTHS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "2026-01", "2026-02", "2026-03", "2026-04", "2026-05", "2026-06", "2026-07",
    ]
});

/// String values used across the suite
pub struct StringFixtures;

impl StringFixtures {
    /// The default claim period
    pub fn month() -> &'static str {
        MONTHS[6]
    }

    /// A department name
    pub fn department() -> &'static str {
        "Computer Science"
    }

    /// A second department name
    pub fn other_department() -> &'static str {
        "Mathematics"
    }

    /// A lecturer display name
    pub fn lecturer_name() -> &'static str {
        "Thandi Nkosi"
    }
}

/// Actor contexts for each workflow role
pub struct ActorFixtures;

impl ActorFixtures {
    /// A lecturer principal owning the given profile
    pub fn lecturer(lecturer_id: LecturerId) -> ActorContext {
        ActorContext::lecturer("tnkosi", UserId::new(), lecturer_id)
    }

    /// A coordinator principal
    pub fn coordinator() -> ActorContext {
        ActorContext::staff("coordinator", UserId::new(), Role::Coordinator)
    }

    /// A manager principal
    pub fn manager() -> ActorContext {
        ActorContext::staff("manager", UserId::new(), Role::Manager)
    }

    /// An HR principal
    pub fn hr() -> ActorContext {
        ActorContext::staff("hr.admin", UserId::new(), Role::Hr)
    }
}
