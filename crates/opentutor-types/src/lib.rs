//! # opentutor-types
//!
//! Shared types, errors, and constants for the **OpenTutor** marketplace core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`CourseId`], [`OfferId`], [`TokenId`]
//! - **Identity model**: [`Role`], [`UserProfile`]
//! - **Course model**: [`Course`], [`CourseSpec`]
//! - **Session model**: [`SessionOffer`], [`OfferStatus`]
//! - **Review model**: [`SessionReview`], [`CourseReview`]
//! - **Events**: [`MarketEvent`] for external indexing
//! - **Errors**: [`OpentutorError`] with `OT_ERR_` prefix codes and
//!   [`ErrorCategory`] classification
//! - **Constants**: rating bounds, royalty cap, first-id values

pub mod constants;
pub mod course;
pub mod error;
pub mod event;
pub mod ids;
pub mod profile;
pub mod review;
pub mod session;

// Re-export all primary types at crate root for ergonomic imports:
//   use opentutor_types::{Course, SessionOffer, Role, ...};

pub use course::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use profile::*;
pub use review::*;
pub use session::*;

// Constants are accessed via `opentutor_types::constants::FOO`
// (not re-exported to avoid name collisions).
