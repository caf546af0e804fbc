//! Marketplace events for observability and external indexing.
//!
//! Every fund movement and listing produces a [`MarketEvent`]. The market
//! and escrow keep append-only journals of these and mirror each one through
//! `tracing`, so an external indexer can consume either surface. Events
//! carry the stable sequential ids external collaborators key on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, CourseId, OfferId, TokenId};

/// An observable marketplace event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// An instructor listed a new course.
    CourseListed {
        course_id: CourseId,
        instructor: AccountId,
        max_supply: u32,
        price: Decimal,
    },
    /// A student purchased course access; an enrollment token was minted
    /// and the full payment went to the instructor.
    CoursePurchased {
        course_id: CourseId,
        student: AccountId,
        token_id: TokenId,
        price: Decimal,
    },
    /// A student created and funded a session offer.
    SessionOffered {
        offer_id: OfferId,
        student: AccountId,
        instructor: AccountId,
        amount: Decimal,
        duration_secs: u64,
    },
    /// The instructor accepted a session offer. No funds moved.
    SessionAccepted {
        offer_id: OfferId,
        instructor: AccountId,
    },
    /// The student confirmed completion; escrowed funds went to the
    /// instructor.
    PaymentReleased {
        offer_id: OfferId,
        instructor: AccountId,
        amount: Decimal,
    },
    /// The student cancelled before acceptance; escrowed funds returned.
    PaymentRefunded {
        offer_id: OfferId,
        student: AccountId,
        amount: Decimal,
    },
}

impl MarketEvent {
    /// Stable SCREAMING_CASE label for log lines and indexers.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CourseListed { .. } => "COURSE_LISTED",
            Self::CoursePurchased { .. } => "COURSE_PURCHASED",
            Self::SessionOffered { .. } => "SESSION_OFFERED",
            Self::SessionAccepted { .. } => "SESSION_ACCEPTED",
            Self::PaymentReleased { .. } => "PAYMENT_RELEASED",
            Self::PaymentRefunded { .. } => "PAYMENT_REFUNDED",
        }
    }
}

impl std::fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kinds() {
        let ev = MarketEvent::CourseListed {
            course_id: CourseId(0),
            instructor: AccountId::new(),
            max_supply: 10,
            price: Decimal::ONE,
        };
        assert_eq!(ev.kind(), "COURSE_LISTED");
        assert_eq!(ev.to_string(), "COURSE_LISTED");

        let ev = MarketEvent::PaymentRefunded {
            offer_id: OfferId(1),
            student: AccountId::new(),
            amount: Decimal::ONE,
        };
        assert_eq!(ev.kind(), "PAYMENT_REFUNDED");
    }

    #[test]
    fn event_serde_roundtrip() {
        let ev = MarketEvent::SessionOffered {
            offer_id: OfferId(1),
            student: AccountId::new(),
            instructor: AccountId::new(),
            amount: Decimal::new(1, 1),
            duration_secs: 3600,
        };
        let json = serde_json::to_string(&ev).unwrap();
        let back: MarketEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }
}
