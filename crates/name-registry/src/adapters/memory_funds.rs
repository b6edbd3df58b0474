//! In-Memory Funds Adapter
//!
//! Implements the `FundsLedger` port over a map of account balances.

use crate::domain::{Address, Amount, FundsError};
use crate::ports::outbound::FundsLedger;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// In-memory account balances, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryFunds {
    balances: RwLock<HashMap<Address, Amount>>,
}

impl InMemoryFunds {
    /// Create a ledger with no balances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with the given opening balances.
    pub fn with_balances(balances: impl IntoIterator<Item = (Address, Amount)>) -> Self {
        Self {
            balances: RwLock::new(balances.into_iter().collect()),
        }
    }

    /// Set the balance of `account`.
    pub fn set_balance(&self, account: Address, balance: Amount) {
        self.balances.write().insert(account, balance);
    }

    /// Sum of all balances.
    pub fn total_supply(&self) -> Amount {
        self.balances
            .read()
            .values()
            .fold(Amount::zero(), |acc, balance| acc.saturating_add(*balance))
    }
}

impl FundsLedger for InMemoryFunds {
    fn balance_of(&self, account: &Address) -> Amount {
        self.balances
            .read()
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    fn debit(&self, account: &Address, amount: Amount) -> Result<(), FundsError> {
        debug!(account = %account, %amount, "Debiting account");

        let mut balances = self.balances.write();
        let available = balances.get(account).copied().unwrap_or_default();
        let remaining = available
            .checked_sub(amount)
            .ok_or(FundsError::InsufficientBalance {
                account: *account,
                required: amount,
                available,
            })?;

        balances.insert(*account, remaining);
        Ok(())
    }

    fn credit(&self, account: &Address, amount: Amount) -> Result<(), FundsError> {
        debug!(account = %account, %amount, "Crediting account");

        let mut balances = self.balances.write();
        let current = balances.get(account).copied().unwrap_or_default();
        let updated = current
            .checked_add(amount)
            .ok_or(FundsError::Overflow { account: *account })?;

        balances.insert(*account, updated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Address {
        Address::new([0xaa; 20])
    }

    #[test]
    fn test_debit_and_credit() {
        let funds = InMemoryFunds::with_balances([(alice(), Amount::from(100u64))]);

        funds.debit(&alice(), Amount::from(30u64)).unwrap();
        assert_eq!(funds.balance_of(&alice()), Amount::from(70u64));

        funds.credit(&alice(), Amount::from(5u64)).unwrap();
        assert_eq!(funds.balance_of(&alice()), Amount::from(75u64));
    }

    #[test]
    fn test_overdraft_leaves_balance_untouched() {
        let funds = InMemoryFunds::with_balances([(alice(), Amount::from(10u64))]);

        let err = funds.debit(&alice(), Amount::from(11u64)).unwrap_err();
        assert_eq!(
            err,
            FundsError::InsufficientBalance {
                account: alice(),
                required: Amount::from(11u64),
                available: Amount::from(10u64),
            }
        );
        assert_eq!(funds.balance_of(&alice()), Amount::from(10u64));
    }

    #[test]
    fn test_credit_overflow() {
        let funds = InMemoryFunds::new();
        funds.set_balance(alice(), Amount::MAX);

        assert!(matches!(
            funds.credit(&alice(), Amount::one()),
            Err(FundsError::Overflow { .. })
        ));
        assert_eq!(funds.balance_of(&alice()), Amount::MAX);
    }

    #[test]
    fn test_unknown_account_is_empty() {
        let funds = InMemoryFunds::new();
        assert!(funds.balance_of(&alice()).is_zero());
        assert_eq!(funds.total_supply(), Amount::zero());
    }
}
