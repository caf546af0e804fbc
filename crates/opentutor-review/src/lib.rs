//! # opentutor-review
//!
//! **Review plane**: the rating gate. A rating is admitted only when the
//! underlying transaction is provably complete — a session review requires
//! the referenced offer to be `Completed` and authored by its student; a
//! course review requires the author to hold an enrollment token.
//!
//! The ledger reads market and escrow state through read-only queries and
//! never mutates either: data flows one way, registry → market/escrow →
//! review.

pub mod ledger;

pub use ledger::ReviewLedger;
