//! # Pricing
//!
//! Resolves the deposit required to claim a name: the custom price of an
//! existing record, or the default collateral.

use super::entities::DomainRecord;
use super::errors::RegistryError;
use super::ledger::Ledger;
use super::value_objects::{Amount, CanonicalName};

/// Default collateral: 0.001 of an 18-decimal unit.
pub const DEFAULT_COLLATERAL: u64 = 1_000_000_000_000_000;

/// Deposit resolution over a fixed default collateral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    default_collateral: Amount,
}

impl Pricing {
    /// Create pricing with the given default collateral.
    pub fn new(default_collateral: Amount) -> Self {
        Self { default_collateral }
    }

    /// The default deposit.
    pub fn collateral(&self) -> Amount {
        self.default_collateral
    }

    /// Deposit required to claim `name`.
    pub fn required_deposit(&self, ledger: &Ledger, name: &str) -> Amount {
        match ledger.get(name) {
            Some(record) if !record.price.is_zero() => record.price,
            _ => self.default_collateral,
        }
    }

    /// Build a preset for `name`. The caller has already checked access,
    /// the name and its parent.
    pub fn preset(
        &self,
        ledger: &Ledger,
        name: CanonicalName,
        price: Amount,
    ) -> Result<DomainRecord, RegistryError> {
        if price.is_zero() {
            return Err(RegistryError::PriceMustBePositive);
        }
        if ledger.contains(name.as_str()) {
            return Err(RegistryError::Duplicate {
                name: name.into_string(),
            });
        }
        Ok(DomainRecord::preset(name, price))
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Self::new(Amount::from(DEFAULT_COLLATERAL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::name::validate;

    #[test]
    fn test_default_collateral() {
        let pricing = Pricing::default();
        assert_eq!(pricing.collateral(), Amount::from(10u64).pow(Amount::from(15u64)));
        assert_eq!(pricing.required_deposit(&Ledger::new(), "com"), pricing.collateral());
    }

    #[test]
    fn test_preset_price_is_required() {
        let pricing = Pricing::default();
        let mut ledger = Ledger::new();
        let preset = pricing
            .preset(&ledger, validate("ua").unwrap(), Amount::from(42u64))
            .unwrap();
        ledger.insert(preset).unwrap();

        assert_eq!(pricing.required_deposit(&ledger, "ua"), Amount::from(42u64));
    }

    #[test]
    fn test_zero_price_rejected() {
        let pricing = Pricing::default();
        assert_eq!(
            pricing.preset(&Ledger::new(), validate("ua").unwrap(), Amount::zero()),
            Err(RegistryError::PriceMustBePositive)
        );
    }

    #[test]
    fn test_duplicate_preset_rejected() {
        let pricing = Pricing::default();
        let mut ledger = Ledger::new();
        ledger
            .insert(DomainRecord::preset(validate("ua").unwrap(), Amount::from(1u64)))
            .unwrap();

        assert!(matches!(
            pricing.preset(&ledger, validate("ua").unwrap(), Amount::from(2u64)),
            Err(RegistryError::Duplicate { .. })
        ));
    }
}
