//! # Event Log
//!
//! Append-only audit trail of every state-changing ledger call.
//!
//! Replaying the entries in order reconstructs the current registry: a
//! `register` creates or claims a record, a later `remove` cancels it.

use super::entities::{DomainRecord, EventEntry};
use super::ledger::Ledger;
use super::value_objects::{Address, Amount, CanonicalName, Operation};

/// Ordered, immutable event history.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    entries: Vec<EventEntry>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return it.
    pub fn append(
        &mut self,
        name: CanonicalName,
        owner: Address,
        deposit: Amount,
        price: Amount,
        operation: Operation,
    ) -> &EventEntry {
        let sequence = self.entries.len() as u64;
        self.entries.push(EventEntry {
            sequence,
            name,
            owner,
            deposit,
            price,
            operation,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// All entries in call order.
    pub fn entries(&self) -> &[EventEntry] {
        &self.entries
    }

    /// Entries with `sequence >= from`.
    pub fn since(&self, from: u64) -> &[EventEntry] {
        let start = usize::try_from(from)
            .unwrap_or(usize::MAX)
            .min(self.entries.len());
        &self.entries[start..]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuild the registry state described by `entries`.
    pub fn replay(entries: &[EventEntry]) -> Ledger {
        let mut ledger = Ledger::new();
        for entry in entries {
            match entry.operation {
                Operation::Register => apply_register(&mut ledger, entry),
                Operation::Remove => {
                    ledger.remove(entry.name.as_str());
                }
            }
        }
        ledger
    }

    /// Rebuild the registry state from the whole log.
    pub fn replay_all(&self) -> Ledger {
        Self::replay(&self.entries)
    }
}

fn apply_register(ledger: &mut Ledger, entry: &EventEntry) {
    ledger.upsert(DomainRecord {
        name: entry.name.clone(),
        owner: (!entry.deposit.is_zero()).then_some(entry.owner),
        deposit: entry.deposit,
        price: entry.price,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::name::validate;

    fn owner() -> Address {
        Address::new([9u8; 20])
    }

    fn entry(log: &mut EventLog, name: &str, who: Address, amounts: (u64, u64), op: Operation) {
        let (deposit, price) = amounts;
        let name = validate(name).unwrap();
        log.append(name, who, Amount::from(deposit), Amount::from(price), op);
    }

    #[test]
    fn test_append_assigns_sequence() {
        let mut log = EventLog::new();
        let first = log
            .append(
                validate("com").unwrap(),
                owner(),
                Amount::from(1u64),
                Amount::from(1u64),
                Operation::Register,
            )
            .sequence;
        let second = log
            .append(
                validate("com").unwrap(),
                Address::ZERO,
                Amount::zero(),
                Amount::zero(),
                Operation::Remove,
            )
            .sequence;

        assert_eq!((first, second), (0, 1));
        assert_eq!(log.len(), 2);
        assert_eq!(log.since(1).len(), 1);
        assert!(log.since(10).is_empty());
    }

    #[test]
    fn test_replay_cancels_removed_names() {
        let mut log = EventLog::new();
        for name in ["com", "ua", "test.ua", "uk"] {
            entry(&mut log, name, owner(), (5, 5), Operation::Register);
        }
        entry(&mut log, "ua", Address::ZERO, (0, 0), Operation::Remove);

        let ledger = log.replay_all();
        let names: Vec<_> = ledger.iter().map(|r| r.name.to_string()).collect();
        assert_eq!(names, vec!["com", "test.ua", "uk"]);
    }

    #[test]
    fn test_replay_preset_then_claim() {
        let mut log = EventLog::new();
        entry(&mut log, "ua", Address::ZERO, (0, 7), Operation::Register);

        let preset = log.replay_all();
        assert!(preset.get("ua").unwrap().is_preset());

        entry(&mut log, "ua", owner(), (7, 7), Operation::Register);
        let claimed = log.replay_all();
        let record = claimed.get("ua").unwrap();
        assert_eq!(record.owner, Some(owner()));
        assert_eq!(record.deposit, Amount::from(7u64));
        assert_eq!(claimed.len(), 1);
    }

    #[test]
    fn test_replay_owner_follows_deposit() {
        let mut log = EventLog::new();
        entry(&mut log, "com", Address::ZERO, (3, 3), Operation::Register);

        let ledger = log.replay_all();
        let record = ledger.get("com").unwrap();
        assert_eq!(record.owner, Some(Address::ZERO));
        assert!(!record.is_preset());
    }
}
