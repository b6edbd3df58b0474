//! # Access Controller
//!
//! Single-administrator permission checks. The administrator is fixed when
//! the registry is created.

use super::errors::RegistryError;
use super::value_objects::Address;

/// Holds the administrator identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessController {
    administrator: Address,
}

impl AccessController {
    /// Create a controller for `administrator`.
    pub fn new(administrator: Address) -> Self {
        Self { administrator }
    }

    /// The administrator identity.
    pub fn administrator(&self) -> Address {
        self.administrator
    }

    /// Returns true if `caller` is the administrator.
    pub fn is_administrator(&self, caller: &Address) -> bool {
        *caller == self.administrator
    }

    /// Fails with `AccessDenied` unless `caller` is the administrator.
    pub fn ensure_administrator(&self, caller: &Address) -> Result<(), RegistryError> {
        if self.is_administrator(caller) {
            Ok(())
        } else {
            Err(RegistryError::AccessDenied { caller: *caller })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_administrator_check() {
        let admin = Address::new([1u8; 20]);
        let other = Address::new([2u8; 20]);
        let access = AccessController::new(admin);

        assert!(access.ensure_administrator(&admin).is_ok());
        assert_eq!(
            access.ensure_administrator(&other),
            Err(RegistryError::AccessDenied { caller: other })
        );
        assert_eq!(access.administrator(), admin);
    }
}
