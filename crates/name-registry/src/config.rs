//! Registry configuration from code or environment variables.

use crate::domain::{Address, Amount, DEFAULT_COLLATERAL};
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No administrator was supplied.
    #[error("administrator address is not set (NL_ADMINISTRATOR)")]
    MissingAdministrator,

    /// The administrator is not a 20-byte hex address.
    #[error("invalid administrator address: {0:?}")]
    InvalidAdministrator(String),

    /// The administrator is the zero identity.
    #[error("administrator must not be the zero address")]
    ZeroAdministrator,

    /// The collateral is not a decimal amount.
    #[error("invalid default collateral: {0:?}")]
    InvalidCollateral(String),

    /// A zero collateral would let owned records hold no deposit.
    #[error("default collateral must be positive")]
    ZeroCollateral,
}

/// Configuration of a registry instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Identity allowed to create presets and sweep escrow.
    pub administrator: Address,
    /// Deposit for names without a preset price.
    pub default_collateral: Amount,
    /// Route `register_domain_fast` through the single-pass validator.
    pub fast_path_enabled: bool,
}

impl RegistryConfig {
    /// Configuration for `administrator` with the default collateral.
    pub fn new(administrator: Address) -> Self {
        Self {
            administrator,
            default_collateral: Amount::from(DEFAULT_COLLATERAL),
            fast_path_enabled: true,
        }
    }

    /// Configuration for tests: a fixed administrator and a small collateral.
    pub fn for_testing() -> Self {
        Self {
            administrator: Address::new([0xad; 20]),
            default_collateral: Amount::from(1_000u64),
            fast_path_enabled: true,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `NL_ADMINISTRATOR`: administrator address, hex (required)
    /// - `NL_DEFAULT_COLLATERAL`: decimal base units (default: 10^15)
    /// - `NL_FAST_PATH`: enable the fast registration path (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_admin =
            env::var("NL_ADMINISTRATOR").map_err(|_| ConfigError::MissingAdministrator)?;
        let administrator = Address::from_hex(raw_admin.trim())
            .ok_or_else(|| ConfigError::InvalidAdministrator(raw_admin.clone()))?;

        let default_collateral = match env::var("NL_DEFAULT_COLLATERAL") {
            Ok(raw) => Amount::from_dec_str(raw.trim())
                .map_err(|_| ConfigError::InvalidCollateral(raw.clone()))?,
            Err(_) => Amount::from(DEFAULT_COLLATERAL),
        };

        let fast_path_enabled = env::var("NL_FAST_PATH")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        let config = Self {
            administrator,
            default_collateral,
            fast_path_enabled,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the registry cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.administrator.is_zero() {
            return Err(ConfigError::ZeroAdministrator);
        }
        if self.default_collateral.is_zero() {
            return Err(ConfigError::ZeroCollateral);
        }
        Ok(())
    }
}
