//! # opentutor-escrow
//!
//! **Escrow plane**: session-offer custody and the booking state machine.
//!
//! Funds are custodied the moment an offer is created and stay attributed to
//! that offer until the student either confirms completion (release to the
//! instructor) or cancels before acceptance (refund). The escrow's total
//! custodied balance therefore always equals the sum of amounts for offers
//! still in `Offered` or `Accepted`.
//!
//! Every operation commits its state transition strictly before the vault
//! movement, so a re-entrant observer sees the post-transition status and
//! the same offer can never double-release or double-refund.

pub mod escrow;

pub use escrow::SessionEscrow;
