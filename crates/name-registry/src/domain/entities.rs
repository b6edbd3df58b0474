//! # Domain Entities
//!
//! Ledger records and the immutable entries of the audit log.

use super::value_objects::{Address, Amount, CanonicalName, Operation};
use serde::{Deserialize, Serialize};

/// A name held in the ledger.
///
/// `owner` is set iff `deposit > 0`. A record without owner but with a
/// positive `price` is a preset created by the administrator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Canonical name, also the ledger key.
    pub name: CanonicalName,
    /// Current owner, if claimed.
    pub owner: Option<Address>,
    /// Amount currently escrowed for this record.
    pub deposit: Amount,
    /// Amount required to claim the name (zero means the default collateral).
    pub price: Amount,
}

impl DomainRecord {
    /// A record claimed by `owner` with `deposit` escrowed.
    pub fn claimed(name: CanonicalName, owner: Address, deposit: Amount, price: Amount) -> Self {
        Self {
            name,
            owner: Some(owner),
            deposit,
            price,
        }
    }

    /// An unclaimed preset with a custom price.
    pub fn preset(name: CanonicalName, price: Amount) -> Self {
        Self {
            name,
            owner: None,
            deposit: Amount::zero(),
            price,
        }
    }

    /// Returns true if the record has an owner.
    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    /// Returns true if this is an unclaimed administrator preset.
    pub fn is_preset(&self) -> bool {
        self.owner.is_none() && !self.price.is_zero()
    }

    /// Returns true if `caller` owns this record.
    pub fn is_owned_by(&self, caller: &Address) -> bool {
        self.owner.as_ref() == Some(caller)
    }

    /// Owner, or the zero identity for unclaimed records.
    pub fn owner_or_zero(&self) -> Address {
        self.owner.unwrap_or(Address::ZERO)
    }
}

/// One entry of the append-only audit log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    /// Position in the log, starting at zero.
    pub sequence: u64,
    /// Canonical name affected.
    pub name: CanonicalName,
    /// Owner after a `register`; the zero identity for `remove` and presets.
    pub owner: Address,
    /// Deposit escrowed by a `register`; zero for `remove` and presets.
    pub deposit: Amount,
    /// Claim price carried by a `register`; zero for `remove`.
    pub price: Amount,
    /// What happened.
    pub operation: Operation,
}
