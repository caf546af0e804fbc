//! # Session offer — the escrowed booking primitive
//!
//! A `SessionOffer` is a pre-paid booking proposal from a student to an
//! instructor. The offered amount is custodied by the escrow the moment the
//! offer is created and stays fixed for the offer's lifetime.
//!
//! ## State Machine
//!
//! ```text
//!   ┌─────────┐  accept    ┌──────────┐  confirm   ┌───────────┐
//!   │ OFFERED ├───────────▶│ ACCEPTED ├───────────▶│ COMPLETED │
//!   └────┬────┘            └──────────┘            └───────────┘
//!        │ cancel
//!        ▼
//!   ┌───────────┐
//!   │ CANCELLED │
//!   └───────────┘
//! ```
//!
//! There is **no** transition out of `Accepted` except `Completed`: once an
//! instructor accepts, only the student's confirmation moves the funds.
//! Transitions are monotonic; `Completed` and `Cancelled` are terminal,
//! which is what makes double-release and double-refund unreachable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, OfferId, OpentutorError};

/// The lifecycle state of a session offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferStatus {
    /// Created and funded; awaiting the instructor.
    Offered,
    /// The instructor accepted. Only the student's confirmation can
    /// terminate the offer now.
    Accepted,
    /// The student confirmed completion. Funds released to the instructor.
    /// Terminal.
    Completed,
    /// The student cancelled before acceptance. Funds refunded. Terminal.
    Cancelled,
}

impl OfferStatus {
    /// Can this offer transition to the given target state?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Offered, Self::Accepted | Self::Cancelled)
                | (Self::Accepted, Self::Completed)
        )
    }

    /// Whether this state admits no further transitions.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Offered => write!(f, "OFFERED"),
            Self::Accepted => write!(f, "ACCEPTED"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A pre-paid session booking between a student and an instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOffer {
    /// Sequential id, allocated from 1 by the escrow.
    pub id: OfferId,
    /// The student who made (and funded) the offer.
    pub student: AccountId,
    /// The instructor the offer is addressed to.
    pub instructor: AccountId,
    /// Escrowed amount. Fixed at creation, never changed.
    pub amount: Decimal,
    /// Proposed session duration in seconds.
    pub duration_secs: u64,
    /// Current lifecycle state.
    pub status: OfferStatus,
    /// When the offer was created. Recorded for a possible future expiry
    /// transition; no code path reads it for expiry today.
    pub created_at: DateTime<Utc>,
}

impl SessionOffer {
    fn transition(&mut self, target: OfferStatus) -> crate::Result<()> {
        if !self.status.can_transition_to(target) {
            return Err(OpentutorError::InvalidState {
                offer_id: self.id,
                expected: match target {
                    OfferStatus::Completed => OfferStatus::Accepted,
                    _ => OfferStatus::Offered,
                },
                actual: self.status,
            });
        }
        self.status = target;
        Ok(())
    }

    /// Transition `Offered → Accepted`.
    ///
    /// # Errors
    /// Returns `InvalidState` unless the offer is currently `Offered`.
    pub fn accept(&mut self) -> crate::Result<()> {
        self.transition(OfferStatus::Accepted)
    }

    /// Transition `Accepted → Completed`.
    ///
    /// # Errors
    /// Returns `InvalidState` unless the offer is currently `Accepted`.
    pub fn complete(&mut self) -> crate::Result<()> {
        self.transition(OfferStatus::Completed)
    }

    /// Transition `Offered → Cancelled`.
    ///
    /// # Errors
    /// Returns `InvalidState` unless the offer is currently `Offered` —
    /// an accepted offer can never be cancelled.
    pub fn cancel(&mut self) -> crate::Result<()> {
        self.transition(OfferStatus::Cancelled)
    }
}
