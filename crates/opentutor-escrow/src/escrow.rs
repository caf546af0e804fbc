//! The session escrow: offer lifecycle and custody accounting.

use std::collections::HashMap;

use chrono::Utc;
use opentutor_funds::Vault;
use opentutor_registry::IdentityRegistry;
use opentutor_types::{
    AccountId, MarketEvent, OfferId, OfferStatus, OpentutorError, Result, SessionOffer, constants,
};
use rust_decimal::Decimal;

/// Owns every session offer and the funds escrowed against each one.
pub struct SessionEscrow {
    /// All offers, keyed by their sequential id.
    offers: HashMap<OfferId, SessionOffer>,
    /// Next offer id to allocate. Offer ids count up from 1.
    next_offer_id: OfferId,
    /// Sum of amounts for offers in `Offered` or `Accepted`. Mirrors the
    /// vault's custody pool at every observable point.
    custodied: Decimal,
    /// Append-only event journal for external indexing.
    events: Vec<MarketEvent>,
}

impl SessionEscrow {
    /// Create an empty escrow.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offers: HashMap::new(),
            next_offer_id: OfferId(constants::FIRST_OFFER_ID),
            custodied: Decimal::ZERO,
            events: Vec::new(),
        }
    }

    /// Create and fund a session offer to `instructor`. The payment is
    /// custodied immediately; the offer starts in `Offered`.
    ///
    /// # Errors
    /// - `NotRegistered` if the caller never registered
    /// - `InvalidArgument` if `amount` or `duration_secs` is not positive
    /// - `IncorrectAmount` if `payment != amount` (strict equality)
    /// - `InsufficientBalance` if the caller cannot fund the custody
    pub fn make_session_offer(
        &mut self,
        registry: &IdentityRegistry,
        vault: &mut Vault,
        caller: AccountId,
        instructor: AccountId,
        amount: Decimal,
        duration_secs: u64,
        payment: Decimal,
    ) -> Result<OfferId> {
        registry.require_registered(caller)?;

        if amount <= Decimal::ZERO {
            return Err(OpentutorError::InvalidArgument {
                reason: "amount must be > 0".into(),
            });
        }
        if duration_secs == 0 {
            return Err(OpentutorError::InvalidArgument {
                reason: "duration must be > 0".into(),
            });
        }
        if payment != amount {
            return Err(OpentutorError::IncorrectAmount {
                required: amount,
                provided: payment,
            });
        }

        // Custody first: if the caller cannot fund the offer, no id is
        // burned and no record is stored.
        vault.custody(caller, amount)?;

        let offer_id = self.next_offer_id;
        self.next_offer_id = offer_id.next();

        let offer = SessionOffer {
            id: offer_id,
            student: caller,
            instructor,
            amount,
            duration_secs,
            status: OfferStatus::Offered,
            created_at: Utc::now(),
        };
        self.offers.insert(offer_id, offer);
        self.custodied += amount;

        tracing::info!(
            offer = %offer_id,
            student = %caller,
            instructor = %instructor,
            %amount,
            duration_secs,
            "session offered"
        );
        self.events.push(MarketEvent::SessionOffered {
            offer_id,
            student: caller,
            instructor,
            amount,
            duration_secs,
        });

        Ok(offer_id)
    }

    /// Accept an offer. Caller must be the offer's instructor; the offer
    /// must still be `Offered`. No funds move.
    ///
    /// # Errors
    /// - `OfferNotFound` if the offer does not exist
    /// - `InvalidState` unless the offer is `Offered`
    /// - `NotOfferParty` if the caller is not the offer's instructor
    pub fn accept_session_offer(&mut self, caller: AccountId, offer_id: OfferId) -> Result<()> {
        let offer = self
            .offers
            .get_mut(&offer_id)
            .ok_or(OpentutorError::OfferNotFound(offer_id))?;

        if offer.status != OfferStatus::Offered {
            return Err(OpentutorError::InvalidState {
                offer_id,
                expected: OfferStatus::Offered,
                actual: offer.status,
            });
        }
        if caller != offer.instructor {
            return Err(OpentutorError::NotOfferParty {
                offer_id,
                required_party: "instructor",
            });
        }

        offer.accept()?;

        tracing::info!(offer = %offer_id, instructor = %caller, "session accepted");
        self.events.push(MarketEvent::SessionAccepted {
            offer_id,
            instructor: caller,
        });
        Ok(())
    }

    /// Confirm completion of an accepted session. Caller must be the
    /// offer's student. Transitions to `Completed` first, then releases the
    /// escrowed amount to the instructor.
    ///
    /// # Errors
    /// - `OfferNotFound` if the offer does not exist
    /// - `InvalidState` unless the offer is `Accepted`
    /// - `NotOfferParty` if the caller is not the offer's student
    pub fn confirm_session_completion(
        &mut self,
        vault: &mut Vault,
        caller: AccountId,
        offer_id: OfferId,
    ) -> Result<()> {
        let offer = self
            .offers
            .get_mut(&offer_id)
            .ok_or(OpentutorError::OfferNotFound(offer_id))?;

        if offer.status != OfferStatus::Accepted {
            return Err(OpentutorError::InvalidState {
                offer_id,
                expected: OfferStatus::Accepted,
                actual: offer.status,
            });
        }
        if caller != offer.student {
            return Err(OpentutorError::NotOfferParty {
                offer_id,
                required_party: "student",
            });
        }

        // Transition commits before the funds move; a repeat call now
        // fails the state check above, so the release cannot replay.
        offer.complete()?;
        let instructor = offer.instructor;
        let amount = offer.amount;
        self.custodied -= amount;
        vault.release(instructor, amount)?;

        tracing::info!(offer = %offer_id, instructor = %instructor, %amount, "payment released");
        self.events.push(MarketEvent::PaymentReleased {
            offer_id,
            instructor,
            amount,
        });
        Ok(())
    }

    /// Cancel an offer that was never accepted. Caller must be the offer's
    /// student. Transitions to `Cancelled` first, then refunds the student.
    ///
    /// # Errors
    /// - `OfferNotFound` if the offer does not exist
    /// - `InvalidState` unless the offer is `Offered` — an accepted offer
    ///   can never be cancelled
    /// - `NotOfferParty` if the caller is not the offer's student
    pub fn cancel_session_offer(
        &mut self,
        vault: &mut Vault,
        caller: AccountId,
        offer_id: OfferId,
    ) -> Result<()> {
        let offer = self
            .offers
            .get_mut(&offer_id)
            .ok_or(OpentutorError::OfferNotFound(offer_id))?;

        if offer.status != OfferStatus::Offered {
            return Err(OpentutorError::InvalidState {
                offer_id,
                expected: OfferStatus::Offered,
                actual: offer.status,
            });
        }
        if caller != offer.student {
            return Err(OpentutorError::NotOfferParty {
                offer_id,
                required_party: "student",
            });
        }

        offer.cancel()?;
        let student = offer.student;
        let amount = offer.amount;
        self.custodied -= amount;
        vault.release(student, amount)?;

        tracing::info!(offer = %offer_id, student = %student, %amount, "payment refunded");
        self.events.push(MarketEvent::PaymentRefunded {
            offer_id,
            student,
            amount,
        });
        Ok(())
    }

    /// Read-only offer lookup.
    #[must_use]
    pub fn offer(&self, offer_id: OfferId) -> Option<&SessionOffer> {
        self.offers.get(&offer_id)
    }

    /// Sum of amounts for offers still awaiting completion or cancellation.
    #[must_use]
    pub fn custodied(&self) -> Decimal {
        self.custodied
    }

    /// Number of offers ever created.
    #[must_use]
    pub fn offer_count(&self) -> usize {
        self.offers.len()
    }

    /// The event journal, oldest first.
    #[must_use]
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Drain the event journal (for an external indexer).
    pub fn take_events(&mut self) -> Vec<MarketEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for SessionEscrow {
    fn default() -> Self {
        Self::new()
    }
}
