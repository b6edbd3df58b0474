//! # Event Schema
//!
//! Serializable payloads for consumers of the registry event stream.
//!
//! | Payload | Topic |
//! |---------|-------|
//! | `DomainEventPayload` (register) | `name-registry.domain.registered` |
//! | `DomainEventPayload` (remove) | `name-registry.domain.removed` |
//! | `RegistryErrorPayload` | `name-registry.operation.rejected` |

use crate::domain::{
    Address, Amount, EventEntry, Operation, RegistryError, RegistryErrorKind,
};
use serde::{Deserialize, Serialize};

/// Topic names.
pub mod topics {
    /// A name was claimed or preset.
    pub const DOMAIN_REGISTERED: &str = "name-registry.domain.registered";
    /// A name was released or a preset deleted.
    pub const DOMAIN_REMOVED: &str = "name-registry.domain.removed";
    /// An operation was rejected.
    pub const OPERATION_REJECTED: &str = "name-registry.operation.rejected";
}

/// One audit log entry, as published.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEventPayload {
    /// Position in the log.
    pub sequence: u64,
    /// Canonical name.
    pub name: String,
    /// New owner, or the zero identity.
    pub owner: Address,
    /// Escrowed deposit, or zero.
    pub deposit: Amount,
    /// Claim price carried by the record.
    pub price: Amount,
    /// What happened.
    pub operation: Operation,
}

impl DomainEventPayload {
    /// Topic this payload is published on.
    pub fn topic(&self) -> &'static str {
        match self.operation {
            Operation::Register => topics::DOMAIN_REGISTERED,
            Operation::Remove => topics::DOMAIN_REMOVED,
        }
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&EventEntry> for DomainEventPayload {
    fn from(entry: &EventEntry) -> Self {
        Self {
            sequence: entry.sequence,
            name: entry.name.to_string(),
            owner: entry.owner,
            deposit: entry.deposit,
            price: entry.price,
            operation: entry.operation,
        }
    }
}

/// Converts a slice of log entries into payloads.
pub fn payloads(entries: &[EventEntry]) -> Vec<DomainEventPayload> {
    entries.iter().map(DomainEventPayload::from).collect()
}

/// A rejected operation, as published.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryErrorPayload {
    /// Error variant.
    pub kind: RegistryErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Name the operation targeted, when known.
    pub name: Option<String>,
}

impl RegistryErrorPayload {
    /// Build a payload for `err` raised while handling `name`.
    pub fn new(err: &RegistryError, name: Option<&str>) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            name: name.map(str::to_string),
        }
    }

    /// Topic this payload is published on.
    pub fn topic(&self) -> &'static str {
        topics::OPERATION_REJECTED
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
