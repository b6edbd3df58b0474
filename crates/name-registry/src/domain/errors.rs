//! # Domain Errors
//!
//! Error taxonomy of the name ledger. Every failure is returned as a value;
//! a failed operation leaves no state behind.

use super::value_objects::{Address, Amount};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A label is empty or contains a character outside `[a-z0-9-]`,
    /// or starts/ends with a hyphen.
    #[error("invalid character in name: {name:?}")]
    InvalidCharacter {
        /// The offending input.
        name: String,
    },

    /// `://` appears without a leading `http://` or `https://`,
    /// or appears again after the scheme.
    #[error("invalid scheme in name: {name:?}")]
    Scheme {
        /// The offending input.
        name: String,
    },

    /// The parent of a multi-label name has no record.
    #[error("parent domain {parent:?} is not registered")]
    ParentNotRegistered {
        /// The missing parent.
        parent: String,
    },

    /// The name already has an owner.
    #[error("domain {name:?} is already registered")]
    AlreadyRegistered {
        /// The claimed name.
        name: String,
    },

    /// The payment does not equal the required deposit.
    #[error("deposit must equal {required}, got {provided}")]
    DepositMismatch {
        /// Deposit required for the name.
        required: Amount,
        /// Amount provided by the caller.
        provided: Amount,
    },

    /// A preset was requested with a zero price.
    #[error("price must be positive")]
    PriceMustBePositive,

    /// A preset was requested for a name that already has a record.
    #[error("domain {name:?} already has a record")]
    Duplicate {
        /// The existing name.
        name: String,
    },

    /// No record exists for the name.
    #[error("domain {name:?} is not registered")]
    NotFound {
        /// The requested name.
        name: String,
    },

    /// The caller is not allowed to perform the operation.
    #[error("access denied for {caller}")]
    AccessDenied {
        /// The rejected caller.
        caller: Address,
    },

    /// The operation would break a ledger invariant.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The fund transfer backing the operation cannot complete.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount that had to move.
        required: Amount,
        /// Amount available at the source.
        available: Amount,
    },
}

impl RegistryError {
    /// The variant tag, without payload.
    #[must_use]
    pub fn kind(&self) -> RegistryErrorKind {
        match self {
            Self::InvalidCharacter { .. } => RegistryErrorKind::InvalidCharacter,
            Self::Scheme { .. } => RegistryErrorKind::Scheme,
            Self::ParentNotRegistered { .. } => RegistryErrorKind::ParentNotRegistered,
            Self::AlreadyRegistered { .. } => RegistryErrorKind::AlreadyRegistered,
            Self::DepositMismatch { .. } => RegistryErrorKind::DepositMismatch,
            Self::PriceMustBePositive => RegistryErrorKind::PriceMustBePositive,
            Self::Duplicate { .. } => RegistryErrorKind::Duplicate,
            Self::NotFound { .. } => RegistryErrorKind::NotFound,
            Self::AccessDenied { .. } => RegistryErrorKind::AccessDenied,
            Self::InvariantViolation(_) => RegistryErrorKind::InvariantViolation,
            Self::InsufficientFunds { .. } => RegistryErrorKind::InsufficientFunds,
        }
    }

    /// Returns true if the caller can fix the input and resubmit.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCharacter { .. }
                | Self::Scheme { .. }
                | Self::DepositMismatch { .. }
                | Self::PriceMustBePositive
        )
    }
}

/// Variant tag of [`RegistryError`], used in payloads and metric labels.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryErrorKind {
    InvalidCharacter,
    Scheme,
    ParentNotRegistered,
    AlreadyRegistered,
    DepositMismatch,
    PriceMustBePositive,
    Duplicate,
    NotFound,
    AccessDenied,
    InvariantViolation,
    InsufficientFunds,
}

impl RegistryErrorKind {
    /// Stable label, e.g. for metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCharacter => "invalid_character",
            Self::Scheme => "scheme",
            Self::ParentNotRegistered => "parent_not_registered",
            Self::AlreadyRegistered => "already_registered",
            Self::DepositMismatch => "deposit_mismatch",
            Self::PriceMustBePositive => "price_must_be_positive",
            Self::Duplicate => "duplicate",
            Self::NotFound => "not_found",
            Self::AccessDenied => "access_denied",
            Self::InvariantViolation => "invariant_violation",
            Self::InsufficientFunds => "insufficient_funds",
        }
    }
}

/// Errors from the external funds ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FundsError {
    /// The account cannot cover the debit.
    #[error("insufficient balance for {account}: required {required}, available {available}")]
    InsufficientBalance {
        /// Debited account.
        account: Address,
        /// Amount requested.
        required: Amount,
        /// Current balance.
        available: Amount,
    },

    /// The credit would overflow the account balance.
    #[error("balance overflow for {account}")]
    Overflow {
        /// Credited account.
        account: Address,
    },
}

impl From<FundsError> for RegistryError {
    fn from(err: FundsError) -> Self {
        match err {
            FundsError::InsufficientBalance {
                required,
                available,
                ..
            } => Self::InsufficientFunds {
                required,
                available,
            },
            FundsError::Overflow { account } => {
                Self::InvariantViolation(format!("balance overflow for {account}"))
            }
        }
    }
}
