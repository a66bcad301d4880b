//! Report data types.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use ledgerview_shared::types::{OrganizationId, SubAccountId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::SubAccount;

/// Result of reconstructing the balance of a movement sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// Timestamp of the first movement in storage order.
    pub first_access: Option<DateTime<FixedOffset>>,
    /// Reconstructed balance.
    pub balance: Decimal,
    /// Sum of incomes.
    pub incomes: Decimal,
    /// Sum of expense magnitudes.
    pub expenses: Decimal,
}

/// Balance, income, and expense sums over a set of account reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Summed balance.
    pub balance: Decimal,
    /// Summed incomes.
    pub incomes: Decimal,
    /// Summed expenses.
    pub expenses: Decimal,
}

impl ReportTotals {
    /// Sums the figures of the given account reports.
    #[must_use]
    pub fn of(reports: &[AccountReport]) -> Self {
        reports.iter().map(AccountReport::totals).sum()
    }
}

impl Add for ReportTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            balance: self.balance + rhs.balance,
            incomes: self.incomes + rhs.incomes,
            expenses: self.expenses + rhs.expenses,
        }
    }
}

impl Sum for ReportTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Reconstructed figures of one sub-account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountReport {
    /// Sub-account ID.
    pub account_id: SubAccountId,
    /// Sub-account name.
    pub name: String,
    /// Timestamp of the first movement considered.
    pub first_access: Option<DateTime<FixedOffset>>,
    /// Reconstructed balance.
    pub balance: Decimal,
    /// Total incomes.
    pub incomes: Decimal,
    /// Total expenses.
    pub expenses: Decimal,
}

impl AccountReport {
    /// Builds the report of an account from its reconstructed summary.
    #[must_use]
    pub fn new(account: &SubAccount, summary: BalanceSummary) -> Self {
        Self {
            account_id: account.id,
            name: account.name.clone(),
            first_access: summary.first_access,
            balance: summary.balance,
            incomes: summary.incomes,
            expenses: summary.expenses,
        }
    }

    /// Balance, incomes, and expenses of this account.
    #[must_use]
    pub const fn totals(&self) -> ReportTotals {
        ReportTotals {
            balance: self.balance,
            incomes: self.incomes,
            expenses: self.expenses,
        }
    }
}

/// Cumulative report of an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationReport {
    /// Organization ID.
    pub organization_id: OrganizationId,
    /// Organization name.
    pub name: String,
    /// Sum of account balances.
    pub balance: Decimal,
    /// Sum of account incomes.
    pub incomes: Decimal,
    /// Sum of account expenses.
    pub expenses: Decimal,
    /// One report per included sub-account, in storage order.
    pub account_reports: Vec<AccountReport>,
}

impl OrganizationReport {
    /// Report of an organization with nothing to aggregate.
    #[must_use]
    pub fn empty(organization_id: OrganizationId, name: impl Into<String>) -> Self {
        Self {
            organization_id,
            name: name.into(),
            balance: Decimal::ZERO,
            incomes: Decimal::ZERO,
            expenses: Decimal::ZERO,
            account_reports: Vec::new(),
        }
    }

    /// Organization-level figures.
    #[must_use]
    pub const fn totals(&self) -> ReportTotals {
        ReportTotals {
            balance: self.balance,
            incomes: self.incomes,
            expenses: self.expenses,
        }
    }
}

/// A calendar month, rendered as `MM/YYYY`.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a month key, returning `None` for months outside `1..=12`.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if month >= 1 && month <= 12 {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Month of a timestamp, read in the timestamp's own offset.
    #[must_use]
    pub fn of(date: &DateTime<FixedOffset>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Calendar month (1-12).
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid month key: {s}");
        let (month, year) = s.split_once('/').ok_or_else(invalid)?;
        let month = month.parse().map_err(|_| invalid())?;
        let year = year.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Report of an organization for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// Organization ID.
    pub organization_id: OrganizationId,
    /// Organization name.
    pub name: String,
    /// Month covered.
    pub month: MonthKey,
    /// Sum of the month's account balances.
    pub balance: Decimal,
    /// Sum of the month's account incomes.
    pub incomes: Decimal,
    /// Sum of the month's account expenses.
    pub expenses: Decimal,
    /// Per-account figures for the month.
    pub account_reports: Vec<AccountReport>,
}

/// Report of an organization restricted to a date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeReport {
    /// Organization ID.
    pub organization_id: OrganizationId,
    /// Organization name.
    pub name: String,
    /// First day of the window (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the window (inclusive, at midnight).
    pub end_date: NaiveDate,
    /// Sum of account balances within the window.
    pub balance: Decimal,
    /// Sum of account incomes within the window.
    pub incomes: Decimal,
    /// Sum of account expenses within the window.
    pub expenses: Decimal,
}

impl DateRangeReport {
    /// Organization-level figures.
    #[must_use]
    pub const fn totals(&self) -> ReportTotals {
        ReportTotals {
            balance: self.balance,
            incomes: self.incomes,
            expenses: self.expenses,
        }
    }
}
