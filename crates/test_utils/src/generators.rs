//! Property-based test data generators

use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money};
use domain_claims::{CoordinatorStatus, ManagerStatus, MAX_HOURS, MIN_HOURS};

/// Hours within the claimable range
pub fn valid_hours() -> impl Strategy<Value = u32> {
    MIN_HOURS..=MAX_HOURS
}

/// Hours outside the claimable range
pub fn invalid_hours() -> impl Strategy<Value = u32> {
    prop_oneof![Just(0u32), (MAX_HOURS + 1)..1000u32]
}

/// Positive ZAR hourly rates up to R2000
pub fn hourly_rate() -> impl Strategy<Value = Money> {
    (1i64..=200_000i64).prop_map(|minor| Money::from_minor(minor, Currency::ZAR))
}

/// Positive decimal rate values
pub fn rate_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=200_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// One of the five legal status pairs
pub fn legal_status_pair() -> impl Strategy<Value = (CoordinatorStatus, ManagerStatus)> {
    prop_oneof![
        Just((CoordinatorStatus::Pending, ManagerStatus::NotApplicable)),
        Just((CoordinatorStatus::Approved, ManagerStatus::PendingApproval)),
        Just((CoordinatorStatus::Rejected, ManagerStatus::NotApplicable)),
        Just((CoordinatorStatus::Approved, ManagerStatus::Approved)),
        Just((CoordinatorStatus::Approved, ManagerStatus::Rejected)),
    ]
}

/// A random person name for lecturer profiles
pub fn fake_person_name() -> String {
    Name().fake()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::ClaimStatus;

    proptest! {
        #[test]
        fn legal_pairs_always_derive_a_status(pair in legal_status_pair()) {
            prop_assert!(ClaimStatus::from_pair(pair.0, pair.1).is_ok());
        }

        #[test]
        fn generated_rates_are_positive(rate in hourly_rate()) {
            prop_assert!(rate.is_positive());
        }
    }

    #[test]
    fn test_fake_name_is_non_empty() {
        assert!(!fake_person_name().is_empty());
    }
}
