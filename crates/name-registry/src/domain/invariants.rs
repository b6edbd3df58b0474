//! # Domain Invariants
//!
//! Ledger invariants that must hold after every committed operation.
//!
//! - INVARIANT-1: Owner iff Deposit (`owner` set exactly when `deposit > 0`)
//! - INVARIANT-2: Canonical Keys (every stored name satisfies the grammar)
//! - INVARIANT-3: Index Consistency (hash index and ordered slots agree)
//! - INVARIANT-4: Log Replay (replaying the event log yields the ledger)
//!
//! Parents are only checked when a child is created; removing a parent later
//! leaves its children in place.

use super::entities::DomainRecord;
use super::event_log::EventLog;
use super::ledger::Ledger;
use super::name;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: a record has an owner exactly when it holds a deposit.
#[must_use]
pub fn check_owner_deposit_invariant(record: &DomainRecord) -> bool {
    record.owner.is_some() == !record.deposit.is_zero()
}

/// INVARIANT-2: the stored key is already in canonical form.
#[must_use]
pub fn check_canonical_invariant(record: &DomainRecord) -> bool {
    name::validate(record.name.as_str()).is_ok_and(|canonical| canonical == record.name)
}

/// INVARIANT-3: index and slots describe the same records.
#[must_use]
pub fn check_index_invariant(ledger: &Ledger) -> bool {
    ledger.is_consistent() && ledger.iter().count() == ledger.len()
}

/// INVARIANT-4: replaying `log` reproduces `ledger`, in order.
#[must_use]
pub fn check_replay_invariant(ledger: &Ledger, log: &EventLog) -> bool {
    let replayed = log.replay_all();
    replayed.len() == ledger.len() && replayed.iter().eq(ledger.iter())
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(ledger: &Ledger, log: &EventLog) -> InvariantCheckResult {
    let mut violations = Vec::new();

    for record in ledger.iter() {
        if !check_owner_deposit_invariant(record) {
            violations.push(InvariantViolation::OwnerDepositMismatch {
                name: record.name.to_string(),
            });
        }
        if !check_canonical_invariant(record) {
            violations.push(InvariantViolation::NonCanonicalKey {
                name: record.name.to_string(),
            });
        }
    }

    if !check_index_invariant(ledger) {
        violations.push(InvariantViolation::IndexInconsistent);
    }

    if !check_replay_invariant(ledger, log) {
        violations.push(InvariantViolation::ReplayDiverged);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Owner set without deposit, or deposit without owner.
    OwnerDepositMismatch {
        /// Offending record.
        name: String,
    },
    /// Stored key is not canonical.
    NonCanonicalKey {
        /// Offending record.
        name: String,
    },
    /// Hash index and ordered slots disagree.
    IndexInconsistent,
    /// Event log replay does not match the ledger.
    ReplayDiverged,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OwnerDepositMismatch { name } => {
                write!(f, "owner/deposit mismatch for {name}")
            }
            Self::NonCanonicalKey { name } => write!(f, "non-canonical key {name:?}"),
            Self::IndexInconsistent => write!(f, "ledger index inconsistent"),
            Self::ReplayDiverged => write!(f, "event log replay diverged from ledger"),
        }
    }
}
