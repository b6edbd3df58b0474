//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for the name registry.

mod memory_funds;

pub use memory_funds::InMemoryFunds;
