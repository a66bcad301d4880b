//! Report error types.

use chrono::NaiveDate;
use ledgerview_shared::AppError;
use ledgerview_shared::types::OrganizationId;
use thiserror::Error;

use crate::ledger::SnapshotError;

/// Name reported for organizations that could not be found.
pub const UNKNOWN_ORGANIZATION_NAME: &str = "Unknown organization";

/// Errors that can occur during report generation.
///
/// Empty ledgers are not errors: they produce zeroed reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No snapshot exists for the organization.
    #[error("Organization not found: {id}")]
    OrganizationNotFound {
        /// Requested organization ID.
        id: OrganizationId,
        /// Placeholder name for presentation.
        name: String,
    },

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// The snapshot breaks a reporting precondition.
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(#[from] SnapshotError),
}

impl ReportError {
    /// Not-found error carrying the placeholder organization name.
    #[must_use]
    pub fn organization_not_found(id: OrganizationId) -> Self {
        Self::OrganizationNotFound {
            id,
            name: UNKNOWN_ORGANIZATION_NAME.to_string(),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::OrganizationNotFound { .. } => Self::NotFound(err.to_string()),
            ReportError::InvalidDateRange { .. } => Self::Validation(err.to_string()),
            ReportError::MalformedSnapshot(_) => Self::MalformedInput(err.to_string()),
        }
    }
}
