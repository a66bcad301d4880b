//! Ledger snapshot model.
//!
//! This module holds what reporting consumes:
//! - Snapshot types (organizations, sub-accounts, movements)
//! - Snapshot validation against reporting preconditions
//! - The snapshot source interface used to look organizations up

pub mod source;
pub mod types;
pub mod validation;

pub use source::{InMemorySnapshotSource, SnapshotSource};
pub use types::{Movement, Organization, SubAccount};
pub use validation::{MovementField, SnapshotError, SnapshotPolicy, validate_organization};
