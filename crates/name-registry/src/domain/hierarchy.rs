//! # Hierarchy Checker
//!
//! A multi-label name may only be claimed or preset once its parent (the
//! name with the first label dropped) has a record, claimed or preset.

use super::errors::RegistryError;
use super::ledger::Ledger;
use super::value_objects::CanonicalName;

/// Fails with `ParentNotRegistered` if `name` has a parent without a record.
pub fn check_parent(ledger: &Ledger, name: &CanonicalName) -> Result<(), RegistryError> {
    match name.parent() {
        Some(parent) if !ledger.contains(parent) => Err(RegistryError::ParentNotRegistered {
            parent: parent.to_string(),
        }),
        _ => Ok(()),
    }
}
