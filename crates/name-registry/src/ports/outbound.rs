//! # Outbound Ports
//!
//! External balances the escrow moves funds against.

use crate::domain::{Address, Amount, FundsError};

/// Funds ledger - outbound port.
///
/// `debit` and `credit` either apply in full or leave the balance untouched.
pub trait FundsLedger: Send + Sync {
    /// Current balance of `account`.
    fn balance_of(&self, account: &Address) -> Amount;

    /// Take `amount` from `account`.
    fn debit(&self, account: &Address, amount: Amount) -> Result<(), FundsError>;

    /// Give `amount` to `account`.
    fn credit(&self, account: &Address, amount: Amount) -> Result<(), FundsError>;
}
