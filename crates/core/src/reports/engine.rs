//! Report engine: the boundary between callers and report assembly.
//!
//! The engine looks snapshots up, rejects malformed input, and then hands the
//! snapshot to [`ReportService`]. Callers pass the visibility flag already
//! derived from their authorization level.

use chrono::NaiveDate;
use ledgerview_shared::types::OrganizationId;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::error::ReportError;
use super::service::ReportService;
use super::types::{DateRangeReport, MonthlyReport, OrganizationReport};
use crate::ledger::{Organization, SnapshotPolicy, SnapshotSource, validate_organization};

/// Computes reports for organizations supplied by a snapshot source.
#[derive(Debug, Clone)]
pub struct ReportEngine<S> {
    source: S,
    policy: SnapshotPolicy,
}

impl<S: SnapshotSource> ReportEngine<S> {
    /// Creates an engine with the default snapshot policy.
    pub fn new(source: S) -> Self {
        Self::with_policy(source, SnapshotPolicy::default())
    }

    /// Creates an engine with an explicit snapshot policy.
    pub const fn with_policy(source: S, policy: SnapshotPolicy) -> Self {
        Self { source, policy }
    }

    /// The underlying snapshot source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Cumulative report of an organization.
    pub fn snapshot_report(
        &self,
        id: OrganizationId,
        include_private: bool,
    ) -> Result<OrganizationReport, ReportError> {
        let organization = self.load(id)?;
        let report = ReportService::assemble_snapshot(&organization, include_private);
        debug!(
            organization_id = %id,
            include_private,
            accounts = report.account_reports.len(),
            "Snapshot report assembled"
        );
        Ok(report)
    }

    /// Month-bucketed reports of an organization, in chronological order.
    pub fn monthly_report(
        &self,
        id: OrganizationId,
        include_private: bool,
    ) -> Result<Vec<MonthlyReport>, ReportError> {
        let organization = self.load(id)?;
        let reports = ReportService::assemble_monthly(&organization, include_private);
        debug!(
            organization_id = %id,
            include_private,
            months = reports.len(),
            "Monthly report assembled"
        );
        Ok(reports)
    }

    /// Report restricted to movements within `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] if `start` is after `end`,
    /// before the snapshot is looked up.
    pub fn date_range_report(
        &self,
        id: OrganizationId,
        include_private: bool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DateRangeReport, ReportError> {
        if start > end {
            warn!(organization_id = %id, %start, %end, "Rejected inverted date range");
            return Err(ReportError::InvalidDateRange { start, end });
        }

        let organization = self.load(id)?;
        let report = ReportService::assemble_range(&organization, include_private, start, end);
        debug!(
            organization_id = %id,
            include_private,
            %start,
            %end,
            "Date range report assembled"
        );
        Ok(report)
    }

    /// Cumulative reports of several organizations, computed in parallel.
    ///
    /// Results are independent and returned in the order of `ids`.
    pub fn snapshot_reports(
        &self,
        ids: &[OrganizationId],
        include_private: bool,
    ) -> Vec<Result<OrganizationReport, ReportError>> {
        ids.par_iter()
            .map(|&id| self.snapshot_report(id, include_private))
            .collect()
    }

    fn load(&self, id: OrganizationId) -> Result<Organization, ReportError> {
        let Some(organization) = self.source.load_organization(id) else {
            warn!(organization_id = %id, "Organization snapshot not found");
            return Err(ReportError::organization_not_found(id));
        };

        if let Err(err) = validate_organization(&organization, self.policy) {
            warn!(organization_id = %id, error = %err, "Rejected malformed snapshot");
            return Err(err.into());
        }

        debug!(
            organization_id = %id,
            sub_accounts = organization.sub_accounts.len(),
            movements = organization.movement_count(),
            "Organization snapshot loaded"
        );
        Ok(organization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{InMemorySnapshotSource, Movement, MovementField, SnapshotError, SubAccount};
    use chrono::DateTime;
    use ledgerview_shared::types::SubAccountId;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn movement(timestamp: &str, balance: Decimal, income: Decimal, expense: Decimal) -> Movement {
        Movement::new(
            DateTime::parse_from_rfc3339(timestamp).unwrap(),
            balance,
            income,
            expense,
        )
    }

    fn acme() -> Organization {
        Organization::new(OrganizationId::new(), "Acme").with_sub_account(
            SubAccount::new(SubAccountId::new(), "Checking", true)
                .with_movement(movement("2024-05-01T00:00:00Z", dec!(100), dec!(0), dec!(0)))
                .with_movement(movement("2024-05-02T00:00:00Z", dec!(100), dec!(50), dec!(20))),
        )
    }

    fn overdrawn() -> Organization {
        Organization::new(OrganizationId::new(), "Overdrawn").with_sub_account(
            SubAccount::new(SubAccountId::new(), "Checking", true)
                .with_movement(movement("2024-05-01T00:00:00Z", dec!(-40), dec!(0), dec!(0))),
        )
    }

    #[test]
    fn test_snapshot_report_for_known_organization() {
        let org = acme();
        let engine = ReportEngine::new(InMemorySnapshotSource::new([org.clone()]));

        let report = engine.snapshot_report(org.id, false).unwrap();
        assert_eq!(report.balance, dec!(130));
        assert_eq!(report.name, "Acme");
    }

    #[test]
    fn test_missing_organization_is_not_found() {
        let engine = ReportEngine::new(InMemorySnapshotSource::default());
        let id = OrganizationId::new();

        assert!(matches!(
            engine.snapshot_report(id, true),
            Err(ReportError::OrganizationNotFound { id: got, .. }) if got == id
        ));
        assert!(matches!(
            engine.monthly_report(id, true),
            Err(ReportError::OrganizationNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_organization_is_not_an_error() {
        let org = Organization::new(OrganizationId::new(), "Empty");
        let engine = ReportEngine::new(InMemorySnapshotSource::new([org.clone()]));

        let report = engine.snapshot_report(org.id, false).unwrap();
        assert_eq!(report, OrganizationReport::empty(org.id, "Empty"));
        assert!(engine.monthly_report(org.id, false).unwrap().is_empty());
    }

    #[test]
    fn test_inverted_range_rejected_before_lookup() {
        let engine = ReportEngine::new(InMemorySnapshotSource::default());
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        assert!(matches!(
            engine.date_range_report(OrganizationId::new(), true, start, end),
            Err(ReportError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_single_day_range_is_valid() {
        let org = acme();
        let engine = ReportEngine::new(InMemorySnapshotSource::new([org.clone()]));
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();

        let report = engine.date_range_report(org.id, false, day, day).unwrap();
        assert_eq!(report.balance, dec!(130));
        assert_eq!(report.incomes, dec!(50));
    }

    #[test]
    fn test_malformed_snapshot_depends_on_policy() {
        let org = overdrawn();

        let strict = ReportEngine::new(InMemorySnapshotSource::new([org.clone()]));
        assert!(matches!(
            strict.snapshot_report(org.id, true),
            Err(ReportError::MalformedSnapshot(SnapshotError::NegativeAmount {
                field: MovementField::Balance,
                ..
            }))
        ));

        let lenient = ReportEngine::with_policy(
            InMemorySnapshotSource::new([org.clone()]),
            SnapshotPolicy::allowing_negative_balance(),
        );
        assert_eq!(lenient.snapshot_report(org.id, true).unwrap().balance, dec!(-40));
    }

    #[test]
    fn test_snapshot_reports_in_input_order() {
        let first = acme();
        let second = Organization::new(OrganizationId::new(), "Second");
        let missing = OrganizationId::new();
        let engine = ReportEngine::new(InMemorySnapshotSource::new([first.clone(), second.clone()]));

        let results = engine.snapshot_reports(&[second.id, missing, first.id], true);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().name, "Second");
        assert!(matches!(results[1], Err(ReportError::OrganizationNotFound { .. })));
        assert_eq!(results[2].as_ref().unwrap().balance, dec!(130));
    }
}
