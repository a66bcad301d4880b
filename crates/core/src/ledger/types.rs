//! Ledger snapshot types.
//!
//! A snapshot is one organization's full ledger as handed over by the
//! persistence layer. Collections keep their storage (insertion) order; that
//! order is significant for balance reconstruction.

use chrono::{DateTime, FixedOffset};
use ledgerview_shared::types::{OrganizationId, SubAccountId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One recorded balance/income/expense entry of a sub-account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Point in time of the record, in its original UTC offset.
    pub date: DateTime<FixedOffset>,
    /// Stated balance of the account at this point.
    pub balance: Decimal,
    /// Amount received.
    #[serde(default)]
    pub income: Decimal,
    /// Amount spent, stored as a non-negative magnitude.
    #[serde(default)]
    pub expense: Decimal,
}

impl Movement {
    /// Creates a movement.
    #[must_use]
    pub const fn new(
        date: DateTime<FixedOffset>,
        balance: Decimal,
        income: Decimal,
        expense: Decimal,
    ) -> Self {
        Self {
            date,
            balance,
            income,
            expense,
        }
    }
}

/// A checking account belonging to an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAccount {
    /// Sub-account ID.
    pub id: SubAccountId,
    /// Display name.
    pub name: String,
    /// Whether non-privileged callers may see this account.
    #[serde(default)]
    pub public: bool,
    /// Movements in storage order.
    #[serde(default)]
    pub movements: Vec<Movement>,
}

impl SubAccount {
    /// Creates a sub-account with no movements.
    #[must_use]
    pub fn new(id: SubAccountId, name: impl Into<String>, public: bool) -> Self {
        Self {
            id,
            name: name.into(),
            public,
            movements: Vec::new(),
        }
    }

    /// Appends a movement, keeping storage order.
    #[must_use]
    pub fn with_movement(mut self, movement: Movement) -> Self {
        self.movements.push(movement);
        self
    }
}

/// The top-level ledger owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization ID.
    pub id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Sub-accounts in insertion order.
    #[serde(default)]
    pub sub_accounts: Vec<SubAccount>,
}

impl Organization {
    /// Creates an organization with no sub-accounts.
    #[must_use]
    pub fn new(id: OrganizationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sub_accounts: Vec::new(),
        }
    }

    /// Appends a sub-account, keeping insertion order.
    #[must_use]
    pub fn with_sub_account(mut self, account: SubAccount) -> Self {
        self.sub_accounts.push(account);
        self
    }

    /// Total number of movements across all sub-accounts.
    #[must_use]
    pub fn movement_count(&self) -> usize {
        self.sub_accounts.iter().map(|a| a.movements.len()).sum()
    }
}
