//! # opentutor-funds
//!
//! The [`Vault`]: source of truth for every account's available balance and
//! for the escrow custody pool. The market and escrow never hold funds
//! themselves — they instruct the vault, which guarantees that a failed
//! movement leaves every balance untouched and that total supply is
//! conserved across every operation.

pub mod vault;

pub use vault::Vault;
