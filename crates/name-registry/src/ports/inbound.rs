//! # Inbound Ports
//!
//! API trait defining what the name registry can do.
//!
//! Caller identity is an explicit argument on every state-changing call.
//! Mutating calls take `&mut self`, so a single owner serializes them.

use crate::domain::{Address, Amount, DomainRecord, EventEntry, RegistryError};

/// Name registry API - inbound port.
pub trait NameRegistryApi {
    /// Claim `name` for `caller`, escrowing `payment`.
    ///
    /// `payment` must equal the preset price of the name, or the default
    /// collateral when no preset exists. The zero identity cannot claim.
    fn register_domain(
        &mut self,
        caller: Address,
        name: &str,
        payment: Amount,
    ) -> Result<DomainRecord, RegistryError>;

    /// Same contract as [`register_domain`](Self::register_domain) through
    /// the single-pass validator.
    fn register_domain_fast(
        &mut self,
        caller: Address,
        name: &str,
        payment: Amount,
    ) -> Result<DomainRecord, RegistryError>;

    /// Create an unclaimed preset with a custom price. Administrator only.
    fn register_price_domain(
        &mut self,
        caller: Address,
        name: &str,
        price: Amount,
    ) -> Result<DomainRecord, RegistryError>;

    /// Release an owned name (refunding its deposit) or delete an unclaimed
    /// preset (administrator). Returns the refunded amount.
    fn remove_domain(&mut self, caller: Address, name: &str) -> Result<Amount, RegistryError>;

    /// Look up a name. Scheme-qualified and mixed-case forms resolve.
    fn get_domain(&self, name: &str) -> Result<DomainRecord, RegistryError>;

    /// All records in first-registration order.
    fn get_all_domains(&self) -> Vec<DomainRecord>;

    /// Number of records.
    fn count_domains(&self) -> usize;

    /// Default deposit.
    fn collateral(&self) -> Amount;

    /// Sweep every escrowed unit to the administrator. Administrator only.
    fn withdraw_all_funds(&mut self, caller: Address) -> Result<Amount, RegistryError>;

    /// The administrator identity.
    fn owner(&self) -> Address;

    /// The audit log, in call order.
    fn events(&self) -> &[EventEntry];
}
