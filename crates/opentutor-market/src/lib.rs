//! # opentutor-market
//!
//! **Market plane**: course listings and purchase settlement.
//!
//! The [`CourseMarket`] creates one [`EnrollmentLedger`] per course at
//! listing time and is the only writer permitted to mint into it — the
//! ledger checks the market's [`MintAuthority`] on every mint, so a direct
//! external mint call fails regardless of convention.
//!
//! ## Purchase flow
//!
//! ```text
//! buy_course → registry.require_student() → payment == price
//!            → !enrolled → supply < max → balance covers payment
//!            → supply += 1 → ledger.mint()
//!            → vault.transfer(buyer, instructor) → CoursePurchased event
//! ```
//!
//! Every check runs before the first balance movement, and every state
//! mutation commits before the instructor payout, so a failure or re-entry
//! during the payout cannot double-mint or double-count supply.

pub mod enrollment;
pub mod market;

pub use enrollment::{EnrollmentLedger, MintAuthority};
pub use market::CourseMarket;
