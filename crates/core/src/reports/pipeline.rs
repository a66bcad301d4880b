//! Bucketed aggregation pipeline shared by every report.
//!
//! Each report runs the same stages over an organization snapshot:
//!
//! 1. keep the sub-accounts visible to the caller,
//! 2. split each account's movements into buckets (storage order kept),
//! 3. reconstruct one account report per (account, bucket),
//! 4. regroup account reports by bucket across the organization,
//! 5. roll each bucket up into organization totals.
//!
//! Reports differ only in how movements are assigned to buckets, expressed
//! by a [`BucketStrategy`].

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use super::balance::reconstruct;
use super::types::{AccountReport, MonthKey, ReportTotals};
use super::visibility::visible_accounts;
use crate::ledger::{Movement, Organization, SubAccount};

/// Assigns movements to report buckets.
pub trait BucketStrategy {
    /// Bucket identifier. Buckets are emitted in key order.
    type Key: Ord + Clone;

    /// Bucket a movement belongs to, or `None` to leave it out.
    fn bucket_of(&self, movement: &Movement) -> Option<Self::Key>;

    /// Bucket every visible account reports under, even without movements.
    fn baseline(&self) -> Option<Self::Key> {
        None
    }
}

/// Single bucket holding every movement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cumulative;

impl BucketStrategy for Cumulative {
    type Key = ();

    fn bucket_of(&self, _movement: &Movement) -> Option<()> {
        Some(())
    }

    fn baseline(&self) -> Option<()> {
        Some(())
    }
}

/// One bucket per calendar month, read in each movement's own offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct Monthly;

impl BucketStrategy for Monthly {
    type Key = MonthKey;

    fn bucket_of(&self, movement: &Movement) -> Option<MonthKey> {
        Some(MonthKey::of(&movement.date))
    }
}

/// Single bucket holding movements inside an inclusive date window.
///
/// Both bounds are taken at midnight, and movements are compared by their
/// local wall-clock time. A movement later in the day of `end` falls outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithinRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl WithinRange {
    /// Creates a window from `start` midnight to `end` midnight.
    ///
    /// An inverted window is accepted and matches nothing.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(NaiveTime::MIN),
        }
    }

    /// Returns true if the timestamp falls inside the window.
    #[must_use]
    pub fn contains(&self, date: &DateTime<FixedOffset>) -> bool {
        let local = date.naive_local();
        self.start <= local && local <= self.end
    }
}

impl BucketStrategy for WithinRange {
    type Key = ();

    fn bucket_of(&self, movement: &Movement) -> Option<()> {
        self.contains(&movement.date).then_some(())
    }

    fn baseline(&self) -> Option<()> {
        Some(())
    }
}

/// Account reports and organization totals of one bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<K> {
    /// Bucket key.
    pub key: K,
    /// Totals over `accounts`.
    pub totals: ReportTotals,
    /// Account reports in sub-account storage order.
    pub accounts: Vec<AccountReport>,
}

/// Runs the full pipeline over an organization.
///
/// Returns one bucket per key present, in key order. An organization with no
/// visible accounts yields no buckets.
pub fn aggregate<S: BucketStrategy>(
    organization: &Organization,
    include_private: bool,
    strategy: &S,
) -> Vec<Bucket<S::Key>> {
    let per_account = visible_accounts(organization, include_private)
        .flat_map(|account| reconstruct_buckets(account, bucket_movements(account, strategy)));

    roll_up(regroup(per_account))
}

/// Splits an account's movements into buckets, keeping storage order inside each.
pub fn bucket_movements<'a, S: BucketStrategy>(
    account: &'a SubAccount,
    strategy: &S,
) -> BTreeMap<S::Key, Vec<&'a Movement>> {
    let mut buckets: BTreeMap<S::Key, Vec<&Movement>> = BTreeMap::new();
    if let Some(key) = strategy.baseline() {
        buckets.entry(key).or_default();
    }
    for movement in &account.movements {
        if let Some(key) = strategy.bucket_of(movement) {
            buckets.entry(key).or_default().push(movement);
        }
    }
    buckets
}

/// Reconstructs one account report per bucket.
pub fn reconstruct_buckets<K>(
    account: &SubAccount,
    buckets: BTreeMap<K, Vec<&Movement>>,
) -> Vec<(K, AccountReport)> {
    buckets
        .into_iter()
        .map(|(key, movements)| (key, AccountReport::new(account, reconstruct(movements))))
        .collect()
}

/// Groups account reports by bucket key, preserving arrival order per key.
pub fn regroup<K: Ord>(
    reports: impl IntoIterator<Item = (K, AccountReport)>,
) -> BTreeMap<K, Vec<AccountReport>> {
    let mut grouped: BTreeMap<K, Vec<AccountReport>> = BTreeMap::new();
    for (key, report) in reports {
        grouped.entry(key).or_default().push(report);
    }
    grouped
}

/// Sums each group into bucket totals.
pub fn roll_up<K>(grouped: BTreeMap<K, Vec<AccountReport>>) -> Vec<Bucket<K>> {
    grouped
        .into_iter()
        .map(|(key, accounts)| Bucket {
            key,
            totals: ReportTotals::of(&accounts),
            accounts,
        })
        .collect()
}
