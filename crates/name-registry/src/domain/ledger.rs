//! # Ordered Ledger
//!
//! Record store combining a hash index with an order-preserving slot vector.
//!
//! ALGORITHM: `index` maps a name to its slot in `slots`. Removal leaves a
//! tombstone (`None`) so the relative order of the remaining records is
//! untouched. Once tombstones outnumber live records the vector is compacted
//! and the index rebuilt, keeping removal amortized O(1).
//!
//! - Lookup: O(1)
//! - Insert: O(1) amortized
//! - Remove: O(1) amortized
//! - Enumerate: O(live + tombstones), first-registration order

use super::entities::DomainRecord;
use super::errors::RegistryError;
use super::value_objects::{Amount, CanonicalName};
use std::collections::HashMap;

/// Tombstones tolerated before compaction is considered.
const COMPACTION_FLOOR: usize = 32;

/// Name-keyed record store with stable enumeration order.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    index: HashMap<CanonicalName, usize>,
    slots: Vec<Option<DomainRecord>>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no record is live.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of tombstoned slots awaiting compaction.
    pub fn tombstones(&self) -> usize {
        self.slots.len() - self.index.len()
    }

    /// Returns true if a record exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get the record for `name`.
    pub fn get(&self, name: &str) -> Option<&DomainRecord> {
        let slot = *self.index.get(name)?;
        self.slots.get(slot)?.as_ref()
    }

    /// Get the record for `name` for in-place mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut DomainRecord> {
        let slot = *self.index.get(name)?;
        self.slots.get_mut(slot)?.as_mut()
    }

    /// Append a new record at the end of the enumeration order.
    ///
    /// Fails if a record with the same name is already live.
    pub fn insert(&mut self, record: DomainRecord) -> Result<(), RegistryError> {
        if self.index.contains_key(record.name.as_str()) {
            return Err(RegistryError::InvariantViolation(format!(
                "ledger already holds {}",
                record.name
            )));
        }
        self.index.insert(record.name.clone(), self.slots.len());
        self.slots.push(Some(record));
        Ok(())
    }

    /// Replace the record with the same name in place, or append it.
    pub fn upsert(&mut self, record: DomainRecord) {
        if let Some(existing) = self.get_mut(record.name.as_str()) {
            *existing = record;
            return;
        }
        self.index.insert(record.name.clone(), self.slots.len());
        self.slots.push(Some(record));
    }

    /// Remove and return the record for `name`.
    pub fn remove(&mut self, name: &str) -> Option<DomainRecord> {
        let slot = self.index.remove(name)?;
        let record = self.slots.get_mut(slot).and_then(Option::take);
        self.maybe_compact();
        record
    }

    /// Live records in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DomainRecord> {
        self.slots.iter().flatten()
    }

    /// Sum of all escrowed deposits.
    pub fn total_deposits(&self) -> Amount {
        self.iter()
            .fold(Amount::zero(), |acc, record| acc.saturating_add(record.deposit))
    }

    /// Checks that every index entry points at a slot holding its record.
    pub fn is_consistent(&self) -> bool {
        let live_slots = self.slots.iter().flatten().count();
        live_slots == self.index.len()
            && self.index.iter().all(|(name, slot)| {
                matches!(self.slots.get(*slot), Some(Some(record)) if &record.name == name)
            })
    }

    fn maybe_compact(&mut self) {
        let tombstones = self.tombstones();
        if tombstones <= COMPACTION_FLOOR || tombstones <= self.index.len() {
            return;
        }

        self.slots.retain(Option::is_some);
        for (slot, record) in self.slots.iter().enumerate() {
            if let Some(record) = record {
                if let Some(entry) = self.index.get_mut(record.name.as_str()) {
                    *entry = slot;
                }
            }
        }
    }
}
