//! # Ports Layer (Hexagonal Architecture)
//!
//! - `inbound`: what the registry offers to callers
//! - `outbound`: what the registry needs from its host

pub mod inbound;
pub mod outbound;

pub use inbound::NameRegistryApi;
pub use outbound::FundsLedger;
