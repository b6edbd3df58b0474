//! # Domain Module
//!
//! Pure ledger logic for the name registry: validation, hierarchy, pricing,
//! access control, the ordered record store and the audit log. No I/O.

pub mod access;
pub mod entities;
pub mod errors;
pub mod event_log;
pub mod fast_path;
pub mod hierarchy;
pub mod invariants;
pub mod ledger;
pub mod name;
pub mod pricing;
pub mod value_objects;

pub use access::AccessController;
pub use entities::*;
pub use errors::*;
pub use event_log::EventLog;
pub use invariants::*;
pub use ledger::Ledger;
pub use pricing::{Pricing, DEFAULT_COLLATERAL};
pub use value_objects::*;
