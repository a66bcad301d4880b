//! Report assembly.

use chrono::NaiveDate;

use super::pipeline::{Bucket, Cumulative, Monthly, WithinRange, aggregate};
use super::types::{DateRangeReport, MonthlyReport, OrganizationReport, ReportTotals};
use crate::ledger::Organization;

/// Service for assembling ledger reports from an organization snapshot.
///
/// All operations are pure: the same snapshot always yields the same report,
/// and an organization without visible data yields zeroed figures.
pub struct ReportService;

impl ReportService {
    /// Assembles the cumulative report of an organization.
    ///
    /// Every visible sub-account gets one account report over its full
    /// movement list, including accounts without movements.
    #[must_use]
    pub fn assemble_snapshot(organization: &Organization, include_private: bool) -> OrganizationReport {
        let Some(bucket) = aggregate(organization, include_private, &Cumulative).pop() else {
            return OrganizationReport::empty(organization.id, organization.name.clone());
        };

        let Bucket {
            totals, accounts, ..
        } = bucket;

        OrganizationReport {
            organization_id: organization.id,
            name: organization.name.clone(),
            balance: totals.balance,
            incomes: totals.incomes,
            expenses: totals.expenses,
            account_reports: accounts,
        }
    }

    /// Assembles one report per calendar month present in the data.
    ///
    /// Months are returned in chronological order. Within a month, account
    /// reports follow sub-account storage order and each is anchored on the
    /// first movement of that account stored for that month.
    #[must_use]
    pub fn assemble_monthly(organization: &Organization, include_private: bool) -> Vec<MonthlyReport> {
        aggregate(organization, include_private, &Monthly)
            .into_iter()
            .map(|bucket| MonthlyReport {
                organization_id: organization.id,
                name: organization.name.clone(),
                month: bucket.key,
                balance: bucket.totals.balance,
                incomes: bucket.totals.incomes,
                expenses: bucket.totals.expenses,
                account_reports: bucket.accounts,
            })
            .collect()
    }

    /// Assembles organization totals over movements dated within
    /// `[start_date, end_date]`, both bounds at midnight.
    ///
    /// The bounds are not checked here: an inverted range yields zeroed totals.
    #[must_use]
    pub fn assemble_range(
        organization: &Organization,
        include_private: bool,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> DateRangeReport {
        let window = WithinRange::new(start_date, end_date);
        let totals = aggregate(organization, include_private, &window)
            .pop()
            .map_or_else(ReportTotals::default, |bucket| bucket.totals);

        DateRangeReport {
            organization_id: organization.id,
            name: organization.name.clone(),
            start_date,
            end_date,
            balance: totals.balance,
            incomes: totals.incomes,
            expenses: totals.expenses,
        }
    }
}
