//! Balance reconstruction.
//!
//! The balance of a movement sequence is anchored on the stated balance of its
//! first movement in storage order, then moved by every income and expense of
//! the sequence, the first movement's own amounts included:
//!
//! `balance = m[0].balance + Σ income − Σ expense`
//!
//! Storage order is not re-sorted by date. A sequence stored out of
//! chronological order anchors on whichever movement was stored first.

use super::types::BalanceSummary;
use crate::ledger::Movement;

/// Reconstructs balance, incomes, and expenses of a movement sequence.
///
/// An empty sequence yields a zeroed summary without a first access.
#[must_use]
pub fn reconstruct<'a, I>(movements: I) -> BalanceSummary
where
    I: IntoIterator<Item = &'a Movement>,
{
    let mut movements = movements.into_iter();
    let Some(first) = movements.next() else {
        return BalanceSummary::default();
    };

    let (incomes, expenses) = movements.fold(
        (first.income, first.expense),
        |(incomes, expenses), movement| (incomes + movement.income, expenses + movement.expense),
    );

    BalanceSummary {
        first_access: Some(first.date),
        balance: first.balance + incomes - expenses,
        incomes,
        expenses,
    }
}
