//! Ledger report generation.
//!
//! This module provides pure business logic for three reports over an
//! organization snapshot:
//! - Snapshot (cumulative) report
//! - Monthly report
//! - Date range report
//!
//! All three share one bucketed aggregation pipeline (see [`pipeline`]).

pub mod balance;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod service;
pub mod types;
pub mod visibility;


pub use balance::reconstruct;
pub use engine::ReportEngine;
pub use error::{ReportError, UNKNOWN_ORGANIZATION_NAME};
pub use pipeline::{BucketStrategy, Cumulative, Monthly, WithinRange};
pub use service::ReportService;
pub use types::*;
pub use visibility::filter_visible;
