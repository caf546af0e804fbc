//! The review ledger: eligibility-gated, write-once ratings.

use std::collections::HashMap;

use opentutor_escrow::SessionEscrow;
use opentutor_market::CourseMarket;
use opentutor_registry::IdentityRegistry;
use opentutor_types::{
    AccountId, CourseId, CourseReview, OfferId, OfferStatus, OpentutorError, Result,
    SessionReview, constants,
};

/// Records ratings for completed sessions and purchased courses.
pub struct ReviewLedger {
    /// Session reviews, keyed by session id. At most one per session.
    session_reviews: HashMap<OfferId, SessionReview>,
    /// Course reviews, keyed by (course, student). At most one per pair.
    course_reviews: HashMap<(CourseId, AccountId), CourseReview>,
}

impl ReviewLedger {
    /// Create an empty review ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_reviews: HashMap::new(),
            course_reviews: HashMap::new(),
        }
    }

    /// Submit a rating for a completed session. Caller must be a registered
    /// Student and the session's original student.
    ///
    /// # Errors
    /// - `NotRegistered` / `WrongRole` if the caller is not a registered
    ///   Student
    /// - `InvalidRating` if `rating` lies outside [1, 5]
    /// - `OfferNotFound` if the session does not exist
    /// - `InvalidState` unless the session is `Completed`
    /// - `NotOfferParty` if the caller is not the session's student
    /// - `InvalidArgument` if `instructor` does not match the session's
    ///   recorded instructor
    /// - `AlreadyReviewed` on a second review for the same session
    pub fn submit_session_review(
        &mut self,
        registry: &IdentityRegistry,
        escrow: &SessionEscrow,
        caller: AccountId,
        session_id: OfferId,
        instructor: AccountId,
        rating: u8,
        text: impl Into<String>,
    ) -> Result<()> {
        registry.require_student(caller)?;
        Self::validate_rating(rating)?;

        let offer = escrow
            .offer(session_id)
            .ok_or(OpentutorError::OfferNotFound(session_id))?;
        if offer.status != OfferStatus::Completed {
            return Err(OpentutorError::InvalidState {
                offer_id: session_id,
                expected: OfferStatus::Completed,
                actual: offer.status,
            });
        }
        if offer.student != caller {
            return Err(OpentutorError::NotOfferParty {
                offer_id: session_id,
                required_party: "student",
            });
        }
        if offer.instructor != instructor {
            return Err(OpentutorError::InvalidArgument {
                reason: format!("instructor does not match session {session_id}"),
            });
        }
        if self.session_reviews.contains_key(&session_id) {
            return Err(OpentutorError::AlreadyReviewed {
                reason: format!("session {session_id}"),
            });
        }

        tracing::info!(session = %session_id, student = %caller, rating, "session review submitted");
        self.session_reviews.insert(
            session_id,
            SessionReview {
                session_id,
                student: caller,
                instructor,
                rating,
                text: text.into(),
            },
        );
        Ok(())
    }

    /// Submit a rating for a purchased course. Caller must be a registered
    /// Student holding an enrollment token for the course.
    ///
    /// # Errors
    /// - `NotRegistered` / `WrongRole` if the caller is not a registered
    ///   Student
    /// - `InvalidRating` if `rating` lies outside [1, 5]
    /// - `CourseNotFound` if the course does not exist
    /// - `NotEnrolled` if the caller holds no enrollment token
    /// - `AlreadyReviewed` on a second review for the same (course, caller)
    pub fn submit_course_review(
        &mut self,
        registry: &IdentityRegistry,
        market: &CourseMarket,
        caller: AccountId,
        course_id: CourseId,
        rating: u8,
        text: impl Into<String>,
    ) -> Result<()> {
        registry.require_student(caller)?;
        Self::validate_rating(rating)?;

        if market.course(course_id).is_none() {
            return Err(OpentutorError::CourseNotFound(course_id));
        }
        if !market.is_enrolled(course_id, caller) {
            return Err(OpentutorError::NotEnrolled {
                course_id,
                student: caller,
            });
        }
        if self.course_reviews.contains_key(&(course_id, caller)) {
            return Err(OpentutorError::AlreadyReviewed {
                reason: format!("{course_id} by {caller}"),
            });
        }

        tracing::info!(course = %course_id, student = %caller, rating, "course review submitted");
        self.course_reviews.insert(
            (course_id, caller),
            CourseReview {
                course_id,
                student: caller,
                rating,
                text: text.into(),
            },
        );
        Ok(())
    }

    /// The review recorded for a session, if any.
    #[must_use]
    pub fn session_review(&self, session_id: OfferId) -> Option<&SessionReview> {
        self.session_reviews.get(&session_id)
    }

    /// The review `student` recorded for a course, if any.
    #[must_use]
    pub fn course_review(&self, course_id: CourseId, student: AccountId) -> Option<&CourseReview> {
        self.course_reviews.get(&(course_id, student))
    }

    /// Total number of reviews recorded (sessions + courses).
    #[must_use]
    pub fn len(&self) -> usize {
        self.session_reviews.len() + self.course_reviews.len()
    }

    /// Whether no review has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.session_reviews.is_empty() && self.course_reviews.is_empty()
    }

    fn validate_rating(rating: u8) -> Result<()> {
        if (constants::MIN_RATING..=constants::MAX_RATING).contains(&rating) {
            Ok(())
        } else {
            Err(OpentutorError::InvalidRating(rating))
        }
    }
}

impl Default for ReviewLedger {
    fn default() -> Self {
        Self::new()
    }
}
