//! Reporting read model
//!
//! Summarizes fully approved claims for payout reporting. Reads only:
//! building a report never mutates workflow state. Rendering (PDF etc.)
//! belongs to the consumer.

use std::collections::BTreeMap;

use serde::Serialize;

use core_kernel::{Currency, Money};

use crate::claim::{Claim, ManagerStatus};

/// Payout subtotals for one department
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentTotals {
    /// Department name (claim snapshot)
    pub department: String,
    /// Number of approved claims
    pub claim_count: usize,
    /// Sum of claim amounts
    pub total_amount: Money,
    /// Sum of claimed hours
    pub total_hours: u64,
}

/// Summary of all manager-approved claims
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovedClaimsReport {
    /// Number of approved claims
    pub total_claims: usize,
    /// Total payout across departments
    pub total_payout: Money,
    /// Total hours across departments
    pub total_hours: u64,
    /// Subtotals grouped by department, sorted by name
    pub by_department: Vec<DepartmentTotals>,
}

impl ApprovedClaimsReport {
    /// Builds the report from a claim list
    ///
    /// Only claims with `manager_status == Approved` and the soft-delete
    /// flag clear contribute; everything else is ignored.
    pub fn build(claims: &[Claim]) -> Self {
        let approved: Vec<&Claim> = claims
            .iter()
            .filter(|c| !c.is_deleted && c.manager_status == ManagerStatus::Approved)
            .collect();

        let currency = approved
            .first()
            .map(|c| c.hourly_rate.currency())
            .unwrap_or(Currency::ZAR);

        let mut groups: BTreeMap<String, DepartmentTotals> = BTreeMap::new();
        for claim in &approved {
            let entry = groups
                .entry(claim.department_name.clone())
                .or_insert_with(|| DepartmentTotals {
                    department: claim.department_name.clone(),
                    claim_count: 0,
                    total_amount: Money::zero(currency),
                    total_hours: 0,
                });
            entry.claim_count += 1;
            entry.total_amount = entry.total_amount + claim.amount();
            entry.total_hours += u64::from(claim.hours_worked);
        }

        let total_payout = approved
            .iter()
            .fold(Money::zero(currency), |acc, c| acc + c.amount());
        let total_hours = approved.iter().map(|c| u64::from(c.hours_worked)).sum();

        Self {
            total_claims: approved.len(),
            total_payout,
            total_hours,
            by_department: groups.into_values().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimSubmission;
    use core_kernel::LecturerId;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn approved_claim(department: &str, hours: u32, rate: Decimal) -> Claim {
        let mut claim = Claim::submit(
            LecturerId::new(),
            "Lecturer",
            department,
            Money::new(rate, Currency::ZAR),
            ClaimSubmission {
                month: "2026-07".to_string(),
                hours_worked: hours,
                notes: None,
                document: None,
            },
        )
        .unwrap();
        claim.verify("coord").unwrap();
        claim.approve("mgr").unwrap();
        claim
    }

    #[test]
    fn test_report_totals() {
        let claims = vec![
            approved_claim("Computer Science", 100, dec!(350)),
            approved_claim("Computer Science", 50, dec!(350)),
            approved_claim("Mathematics", 80, dec!(300)),
        ];

        let report = ApprovedClaimsReport::build(&claims);

        assert_eq!(report.total_claims, 3);
        assert_eq!(report.total_hours, 230);
        // 100*350 + 50*350 + 80*300
        assert_eq!(report.total_payout.amount(), dec!(76500));

        assert_eq!(report.by_department.len(), 2);
        let cs = &report.by_department[0];
        assert_eq!(cs.department, "Computer Science");
        assert_eq!(cs.claim_count, 2);
        assert_eq!(cs.total_amount.amount(), dec!(52500));
        assert_eq!(cs.total_hours, 150);
    }

    #[test]
    fn test_report_skips_unapproved_and_deleted() {
        let pending = Claim::submit(
            LecturerId::new(),
            "Lecturer",
            "Physics",
            Money::new(dec!(400), Currency::ZAR),
            ClaimSubmission {
                month: "2026-07".to_string(),
                hours_worked: 10,
                notes: None,
                document: None,
            },
        )
        .unwrap();

        let mut deleted = approved_claim("Physics", 20, dec!(400));
        deleted.soft_delete();

        let kept = approved_claim("Physics", 30, dec!(400));

        let report = ApprovedClaimsReport::build(&[pending, deleted, kept]);

        assert_eq!(report.total_claims, 1);
        assert_eq!(report.total_hours, 30);
        assert_eq!(report.total_payout.amount(), dec!(12000));
    }

    #[test]
    fn test_empty_report() {
        let report = ApprovedClaimsReport::build(&[]);
        assert_eq!(report.total_claims, 0);
        assert!(report.total_payout.is_zero());
        assert!(report.by_department.is_empty());
    }
}
