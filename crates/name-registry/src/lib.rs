//! # Name Registry - Hierarchical Name Ownership Ledger
//!
//! Callers claim DNS-like names (`com`, `kos-data.com`) by escrowing a
//! deposit. Owners get the deposit back when they release a name. A single
//! administrator can preset custom prices for unclaimed names, delete unclaimed
//! presets and sweep the escrow.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Owner iff Deposit | `domain/invariants.rs` - `check_owner_deposit_invariant()` |
//! | INVARIANT-2 | Canonical Keys | `domain/invariants.rs` - `check_canonical_invariant()` |
//! | INVARIANT-3 | Index Consistency | `domain/invariants.rs` - `check_index_invariant()` |
//! | INVARIANT-4 | Log Replay | `domain/invariants.rs` - `check_replay_invariant()` |
//!
//! ## Name Grammar
//!
//! Lowercase dot-separated labels, each matching `[a-z0-9]([a-z0-9-]*[a-z0-9])?`.
//! Uppercase input is folded. A leading `http://` or `https://` is stripped
//! once; any other `://` is a scheme error.
//!
//! ## Error Precedence (registration)
//!
//! | Order | Error |
//! |-------|-------|
//! | 1 | `Scheme` |
//! | 2 | `InvalidCharacter` |
//! | 3 | `ParentNotRegistered` |
//! | 4 | `AlreadyRegistered` |
//! | 5 | `DepositMismatch` |
//! | 6 | `InsufficientFunds` (transfer) |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `FundsLedger` | Debit deposits, credit refunds and sweeps |
//!
//! ## Usage Example
//!
//! ```ignore
//! use name_registry::prelude::*;
//!
//! let funds = InMemoryFunds::with_balances([(alice, Amount::from(10u64).pow(18.into()))]);
//! let mut registry = NameRegistryService::new(RegistryConfig::new(admin), funds)?;
//!
//! let deposit = registry.collateral();
//! registry.register_domain(alice, "com", deposit)?;
//! assert_eq!(registry.get_domain("https://COM")?.owner, Some(alice));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{DomainRecord, EventEntry};

    // Value objects
    pub use crate::domain::value_objects::{Address, Amount, CanonicalName, Operation, U256};

    // Errors
    pub use crate::domain::errors::{FundsError, RegistryError, RegistryErrorKind};

    // Domain services
    pub use crate::domain::name::{normalize_for_lookup, validate};
    pub use crate::domain::pricing::DEFAULT_COLLATERAL;
    pub use crate::domain::EventLog;

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::NameRegistryApi;
    pub use crate::ports::outbound::FundsLedger;

    // Adapters
    pub use crate::adapters::InMemoryFunds;

    // Events
    pub use crate::events::{payloads, topics, DomainEventPayload, RegistryErrorPayload};

    // Service
    pub use crate::config::{ConfigError, RegistryConfig};
    pub use crate::service::{NameRegistryService, ServiceStats};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
