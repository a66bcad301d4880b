//! Snapshot sources.
//!
//! The persistence layer decides how ledgers are fetched; reporting only
//! needs one materialized organization at a time.

use std::collections::HashMap;

use ledgerview_shared::types::OrganizationId;

use super::types::Organization;

/// Supplies immutable organization snapshots by ID.
pub trait SnapshotSource: Send + Sync {
    /// Loads the snapshot of an organization, or `None` if it does not exist.
    fn load_organization(&self, id: OrganizationId) -> Option<Organization>;
}

/// Snapshot source backed by organizations already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotSource {
    organizations: HashMap<OrganizationId, Organization>,
    order: Vec<OrganizationId>,
}

impl InMemorySnapshotSource {
    /// Creates a source from a list of organizations.
    ///
    /// A later organization with a duplicate ID replaces the earlier one.
    #[must_use]
    pub fn new(organizations: impl IntoIterator<Item = Organization>) -> Self {
        let mut source = Self::default();
        for organization in organizations {
            source.insert(organization);
        }
        source
    }

    /// Adds or replaces an organization snapshot.
    pub fn insert(&mut self, organization: Organization) {
        let id = organization.id;
        if self.organizations.insert(id, organization).is_none() {
            self.order.push(id);
        }
    }

    /// IDs of all organizations, in first-insertion order.
    #[must_use]
    pub fn organization_ids(&self) -> &[OrganizationId] {
        &self.order
    }

    /// Number of organizations held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no organization is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl SnapshotSource for InMemorySnapshotSource {
    fn load_organization(&self, id: OrganizationId) -> Option<Organization> {
        self.organizations.get(&id).cloned()
    }
}
