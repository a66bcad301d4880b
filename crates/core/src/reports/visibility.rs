//! Sub-account visibility.
//!
//! Callers without elevated privilege only see public sub-accounts. The
//! privilege decision itself is made upstream and arrives as a flag.

use crate::ledger::{Organization, SubAccount};

/// Sub-accounts visible to the caller, in storage order.
pub fn visible_accounts(
    organization: &Organization,
    include_private: bool,
) -> impl Iterator<Item = &SubAccount> {
    organization
        .sub_accounts
        .iter()
        .filter(move |account| include_private || account.public)
}

/// Copy of the organization holding only the sub-accounts visible to the caller.
#[must_use]
pub fn filter_visible(organization: &Organization, include_private: bool) -> Organization {
    Organization {
        id: organization.id,
        name: organization.name.clone(),
        sub_accounts: visible_accounts(organization, include_private)
            .cloned()
            .collect(),
    }
}
