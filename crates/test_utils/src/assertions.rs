//! Custom assertion helpers for domain types

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_claims::{Claim, ClaimStatus};

/// Asserts the claim's status pair is one of the five legal combinations
/// and returns the derived status
pub fn assert_status_pair_legal(claim: &Claim) -> ClaimStatus {
    ClaimStatus::from_pair(claim.coordinator_status, claim.manager_status).unwrap_or_else(|e| {
        panic!(
            "Claim {} holds an illegal status pair ({:?}, {:?}): {e}",
            claim.id, claim.coordinator_status, claim.manager_status
        )
    })
}

/// Asserts the claim amount equals hours times the snapshot rate
pub fn assert_amount_invariant(claim: &Claim) {
    let expected = claim.hourly_rate.amount() * Decimal::from(claim.hours_worked);
    assert_eq!(
        claim.amount().amount(),
        expected,
        "Claim {} amount {} != {} hours * {} rate",
        claim.id,
        claim.amount(),
        claim.hours_worked,
        claim.hourly_rate
    );
}

/// Asserts two money values are equal in amount and currency
pub fn assert_money_eq(left: Money, right: Money) {
    assert_eq!(left.currency(), right.currency(), "currency mismatch");
    assert_eq!(
        left.amount(),
        right.amount(),
        "amount mismatch: {left} != {right}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::ClaimBuilder;

    #[test]
    fn test_builder_output_passes_invariants() {
        let claim = ClaimBuilder::new().approved("coord", "mgr").build();
        assert_eq!(assert_status_pair_legal(&claim), ClaimStatus::FullyApproved);
        assert_amount_invariant(&claim);
    }
}
