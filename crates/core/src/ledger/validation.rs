//! Snapshot validation at the reporting boundary.
//!
//! Reports assume every income and expense is a non-negative magnitude, and
//! that every sum a report can form fits in a `Decimal`. Snapshots that break
//! either are rejected before any aggregation runs.

use ledgerview_shared::types::SubAccountId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{Movement, Organization};

/// A movement field that violates a snapshot precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementField {
    /// The stated balance.
    Balance,
    /// The income amount.
    Income,
    /// The expense magnitude.
    Expense,
}

impl std::fmt::Display for MovementField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Balance => write!(f, "balance"),
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// Errors for snapshots that cannot be reported on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// A movement carries a negative amount.
    #[error("Movement {index} of sub-account {account_id} has negative {field}: {value}")]
    NegativeAmount {
        /// Sub-account holding the movement.
        account_id: SubAccountId,
        /// Position of the movement in storage order.
        index: usize,
        /// Offending field.
        field: MovementField,
        /// Offending value.
        value: Decimal,
    },

    /// The amounts of the snapshot are too large to be summed.
    #[error("Amounts of sub-account {account_id} overflow the report totals")]
    AmountOverflow {
        /// Sub-account whose amounts pushed the sum out of range.
        account_id: SubAccountId,
    },
}

/// Rules applied when validating a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotPolicy {
    /// Accept negative stated balances (overdrawn accounts).
    pub allow_negative_balance: bool,
}

impl SnapshotPolicy {
    /// Creates a policy that also accepts negative balances.
    #[must_use]
    pub const fn allowing_negative_balance() -> Self {
        Self {
            allow_negative_balance: true,
        }
    }
}

/// Validates every movement of an organization snapshot.
///
/// # Errors
///
/// Returns the first violation found, scanning sub-accounts and movements in
/// storage order.
pub fn validate_organization(
    organization: &Organization,
    policy: SnapshotPolicy,
) -> Result<(), SnapshotError> {
    // Every balance, income, and total of any report is bounded by the sum of
    // all magnitudes in the snapshot.
    let mut magnitude = Decimal::ZERO;
    for account in &organization.sub_accounts {
        for (index, movement) in account.movements.iter().enumerate() {
            if let Some((field, value)) = first_violation(movement, policy) {
                return Err(SnapshotError::NegativeAmount {
                    account_id: account.id,
                    index,
                    field,
                    value,
                });
            }
            magnitude = magnitude
                .checked_add(movement.balance.abs())
                .and_then(|sum| sum.checked_add(movement.income))
                .and_then(|sum| sum.checked_add(movement.expense))
                .ok_or(SnapshotError::AmountOverflow {
                    account_id: account.id,
                })?;
        }
    }
    Ok(())
}

fn first_violation(movement: &Movement, policy: SnapshotPolicy) -> Option<(MovementField, Decimal)> {
    if movement.income < Decimal::ZERO {
        return Some((MovementField::Income, movement.income));
    }
    if movement.expense < Decimal::ZERO {
        return Some((MovementField::Expense, movement.expense));
    }
    if !policy.allow_negative_balance && movement.balance < Decimal::ZERO {
        return Some((MovementField::Balance, movement.balance));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::SubAccount;
    use chrono::DateTime;
    use ledgerview_shared::types::OrganizationId;
    use rust_decimal_macros::dec;

    fn movement(balance: Decimal, income: Decimal, expense: Decimal) -> Movement {
        Movement::new(
            DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z").unwrap(),
            balance,
            income,
            expense,
        )
    }

    fn org_with(movements: Vec<Movement>) -> (Organization, SubAccountId) {
        let mut account = SubAccount::new(SubAccountId::new(), "Checking", true);
        account.movements = movements;
        let id = account.id;
        (
            Organization::new(OrganizationId::new(), "Acme").with_sub_account(account),
            id,
        )
    }

    #[test]
    fn test_valid_snapshot() {
        let (org, _) = org_with(vec![
            movement(dec!(100), dec!(0), dec!(0)),
            movement(dec!(0), dec!(50), dec!(20)),
        ]);
        assert!(validate_organization(&org, SnapshotPolicy::default()).is_ok());
    }

    #[test]
    fn test_empty_organization_is_valid() {
        let org = Organization::new(OrganizationId::new(), "Empty");
        assert!(validate_organization(&org, SnapshotPolicy::default()).is_ok());
    }

    #[test]
    fn test_negative_income_rejected() {
        let (org, account_id) = org_with(vec![
            movement(dec!(100), dec!(0), dec!(0)),
            movement(dec!(100), dec!(-5), dec!(0)),
        ]);
        assert_eq!(
            validate_organization(&org, SnapshotPolicy::default()),
            Err(SnapshotError::NegativeAmount {
                account_id,
                index: 1,
                field: MovementField::Income,
                value: dec!(-5),
            })
        );
    }

    #[test]
    fn test_negative_expense_rejected_even_when_balance_allowed() {
        let (org, _) = org_with(vec![movement(dec!(-10), dec!(0), dec!(-1))]);
        let err = validate_organization(&org, SnapshotPolicy::allowing_negative_balance())
            .unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::NegativeAmount {
                field: MovementField::Expense,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_balance_depends_on_policy() {
        let (org, _) = org_with(vec![movement(dec!(-10), dec!(0), dec!(0))]);
        assert!(validate_organization(&org, SnapshotPolicy::default()).is_err());
        assert!(validate_organization(&org, SnapshotPolicy::allowing_negative_balance()).is_ok());
    }

    #[test]
    fn test_negative_zero_is_accepted() {
        let (org, _) = org_with(vec![movement(dec!(0), -dec!(0), -dec!(0))]);
        assert!(validate_organization(&org, SnapshotPolicy::default()).is_ok());
    }

    #[test]
    fn test_amounts_too_large_to_sum_rejected() {
        let (org, account_id) = org_with(vec![
            movement(dec!(0), Decimal::MAX, dec!(0)),
            movement(dec!(0), Decimal::MAX, dec!(0)),
        ]);
        assert_eq!(
            validate_organization(&org, SnapshotPolicy::default()),
            Err(SnapshotError::AmountOverflow { account_id })
        );
    }

    #[test]
    fn test_overflow_counts_amounts_across_accounts() {
        let half = Decimal::MAX / dec!(2);
        let (org, _) = org_with(vec![movement(half, dec!(0), dec!(0))]);
        let second = SubAccount::new(SubAccountId::new(), "Savings", false)
            .with_movement(movement(dec!(0), dec!(0), half))
            .with_movement(movement(dec!(0), dec!(0), half));
        let second_id = second.id;
        let org = org.with_sub_account(second);

        assert_eq!(
            validate_organization(&org, SnapshotPolicy::default()),
            Err(SnapshotError::AmountOverflow {
                account_id: second_id
            })
        );
    }

    #[test]
    fn test_large_amounts_that_fit_are_accepted() {
        let third = Decimal::MAX / dec!(3);
        let (org, _) = org_with(vec![
            movement(third, dec!(0), dec!(0)),
            movement(dec!(0), third, dec!(0)),
        ]);
        assert!(validate_organization(&org, SnapshotPolicy::default()).is_ok());
    }

    #[test]
    fn test_error_message_names_location() {
        let (org, account_id) = org_with(vec![movement(dec!(1), dec!(-2), dec!(0))]);
        let err = validate_organization(&org, SnapshotPolicy::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Movement 0 of sub-account {account_id} has negative income: -2")
        );
    }
}
