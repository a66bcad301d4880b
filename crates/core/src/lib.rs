//! Core reporting logic for Ledgerview.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Ledger snapshots come in through [`ledger::SnapshotSource`]; reports come out
//! as plain values.
//!
//! # Modules
//!
//! - `ledger` - Snapshot model, validation, and snapshot sources
//! - `reports` - Visibility filtering, balance reconstruction, and report assembly

pub mod ledger;
pub mod reports;
