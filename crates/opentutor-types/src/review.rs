//! Review records.
//!
//! Reviews are created once and never mutated. Eligibility (completed
//! session, course enrollment) is enforced by the review ledger, not here —
//! these are the persisted records an indexer reads back.

use serde::{Deserialize, Serialize};

use crate::{AccountId, CourseId, OfferId};

/// A rating for a completed tutoring session. At most one per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReview {
    /// The completed session this review rates.
    pub session_id: OfferId,
    /// The author. Always the session's original student.
    pub student: AccountId,
    /// The instructor who ran the session.
    pub instructor: AccountId,
    /// Rating in [1, 5].
    pub rating: u8,
    /// Free-form review text. Pure data.
    pub text: String,
}

/// A rating for a purchased course. At most one per (course, student).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseReview {
    /// The course this review rates.
    pub course_id: CourseId,
    /// The author. Always holds an enrollment token for the course.
    pub student: AccountId,
    /// Rating in [1, 5].
    pub rating: u8,
    /// Free-form review text. Pure data.
    pub text: String,
}
