//! Error types for the OpenTutor marketplace core.
//!
//! All errors use the `OT_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Registry errors
//! - 2xx: Funds / vault errors
//! - 3xx: Market / course errors
//! - 4xx: Escrow / session errors
//! - 5xx: Review errors
//!
//! Every error also maps onto one of three coarse categories
//! ([`ErrorCategory`]): malformed input, missing authority, or an operation
//! invalid for the entity's current state. A failed operation never leaves
//! partial effects behind, so the category tells the caller whether a retry
//! can ever succeed.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountId, CourseId, OfferId, OfferStatus, Role};

/// Coarse classification of an [`OpentutorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed input: out-of-range rating, non-positive amount,
    /// payment not matching the required amount.
    Validation,
    /// The caller lacks the required role or identity match.
    Authorization,
    /// The operation is invalid for the entity's current state.
    State,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::State => write!(f, "STATE"),
        }
    }
}

/// Central error enum for all OpenTutor operations.
#[derive(Debug, Error)]
pub enum OpentutorError {
    // =================================================================
    // Registry Errors (1xx)
    // =================================================================
    /// The account already holds a profile; registration happens once.
    #[error("OT_ERR_100: Account already registered: {0}")]
    AlreadyRegistered(AccountId),

    /// The account has no profile but the operation requires one.
    #[error("OT_ERR_101: Account not registered: {0}")]
    NotRegistered(AccountId),

    /// The account is registered but holds the wrong role.
    #[error("OT_ERR_102: Wrong role: required {required}, account holds {actual}")]
    WrongRole { required: Role, actual: Role },

    // =================================================================
    // Funds / Vault Errors (2xx)
    // =================================================================
    /// Not enough available balance to perform the operation.
    #[error("OT_ERR_200: Insufficient available balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// The custody pool would go negative — a release without a matching
    /// custody. Indicates an accounting bug, never a caller mistake.
    #[error("OT_ERR_201: Insufficient custodied funds")]
    InsufficientCustody,

    // =================================================================
    // Market / Course Errors (3xx)
    // =================================================================
    /// The requested course does not exist.
    #[error("OT_ERR_300: Course not found: {0}")]
    CourseNotFound(CourseId),

    /// A creation parameter failed validation (zero supply, zero price,
    /// royalty over 100%, zero amount/duration).
    #[error("OT_ERR_301: Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The payment does not match the course price exactly.
    #[error("OT_ERR_302: Insufficient payment: required {required}, provided {provided}")]
    InsufficientPayment { required: Decimal, provided: Decimal },

    /// The student already holds an enrollment token for this course.
    #[error("OT_ERR_303: Already enrolled: {student} in {course_id}")]
    AlreadyEnrolled {
        course_id: CourseId,
        student: AccountId,
    },

    /// Every enrollment token for this course has been minted.
    #[error("OT_ERR_304: Supply exhausted for {0}")]
    SupplyExhausted(CourseId),

    /// A mint was attempted without the market's mint authority.
    #[error("OT_ERR_305: Caller is not the mint authority for {0}")]
    NotMintAuthority(CourseId),

    // =================================================================
    // Escrow / Session Errors (4xx)
    // =================================================================
    /// The requested session offer does not exist.
    #[error("OT_ERR_400: Session offer not found: {0}")]
    OfferNotFound(OfferId),

    /// The payment does not match the offered amount exactly.
    #[error("OT_ERR_401: Incorrect amount: required {required}, provided {provided}")]
    IncorrectAmount { required: Decimal, provided: Decimal },

    /// The offer is not in the state the operation requires.
    #[error("OT_ERR_402: Invalid state for {offer_id}: expected {expected}, got {actual}")]
    InvalidState {
        offer_id: OfferId,
        expected: OfferStatus,
        actual: OfferStatus,
    },

    /// The caller is not the offer party (student/instructor) the
    /// operation requires.
    #[error("OT_ERR_403: Not the offer's {required_party} for {offer_id}")]
    NotOfferParty {
        offer_id: OfferId,
        required_party: &'static str,
    },

    // =================================================================
    // Review Errors (5xx)
    // =================================================================
    /// The rating lies outside the allowed [1, 5] range.
    #[error("OT_ERR_500: Invalid rating: {0} (must be 1..=5)")]
    InvalidRating(u8),

    /// A review already exists for this session or (course, student) pair.
    #[error("OT_ERR_501: Already reviewed: {reason}")]
    AlreadyReviewed { reason: String },

    /// The caller holds no enrollment token for the course it tried to
    /// review.
    #[error("OT_ERR_502: Not enrolled: {student} in {course_id}")]
    NotEnrolled {
        course_id: CourseId,
        student: AccountId,
    },
}

impl OpentutorError {
    /// The coarse category of this error (validation / authorization / state).
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InsufficientBalance { .. }
            | Self::InvalidArgument { .. }
            | Self::InsufficientPayment { .. }
            | Self::IncorrectAmount { .. }
            | Self::InvalidRating(_) => ErrorCategory::Validation,

            Self::NotRegistered(_)
            | Self::WrongRole { .. }
            | Self::NotMintAuthority(_)
            | Self::NotOfferParty { .. }
            | Self::NotEnrolled { .. } => ErrorCategory::Authorization,

            Self::AlreadyRegistered(_)
            | Self::InsufficientCustody
            | Self::CourseNotFound(_)
            | Self::AlreadyEnrolled { .. }
            | Self::SupplyExhausted(_)
            | Self::OfferNotFound(_)
            | Self::InvalidState { .. }
            | Self::AlreadyReviewed { .. } => ErrorCategory::State,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpentutorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = OpentutorError::CourseNotFound(CourseId(3));
        let msg = format!("{err}");
        assert!(msg.starts_with("OT_ERR_300"), "Got: {msg}");
        assert!(msg.contains("course:3"));
    }

    #[test]
    fn insufficient_payment_display() {
        let err = OpentutorError::InsufficientPayment {
            required: Decimal::new(10, 1),
            provided: Decimal::new(5, 1),
        };
        let msg = format!("{err}");
        assert!(msg.contains("OT_ERR_302"));
        assert!(msg.contains("1.0"));
        assert!(msg.contains("0.5"));
    }

    #[test]
    fn invalid_state_display() {
        let err = OpentutorError::InvalidState {
            offer_id: OfferId(1),
            expected: OfferStatus::Offered,
            actual: OfferStatus::Cancelled,
        };
        let msg = format!("{err}");
        assert!(msg.contains("OT_ERR_402"));
        assert!(msg.contains("OFFERED"));
        assert!(msg.contains("CANCELLED"));
    }

    #[test]
    fn categories_cover_all_three() {
        assert_eq!(
            OpentutorError::InvalidRating(6).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            OpentutorError::NotRegistered(AccountId::new()).category(),
            ErrorCategory::Authorization
        );
        assert_eq!(
            OpentutorError::SupplyExhausted(CourseId(0)).category(),
            ErrorCategory::State
        );
        assert_eq!(
            OpentutorError::WrongRole {
                required: Role::Instructor,
                actual: Role::Student,
            }
            .category(),
            ErrorCategory::Authorization
        );
    }

    #[test]
    fn all_errors_have_ot_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(OpentutorError::AlreadyRegistered(AccountId::new())),
            Box::new(OpentutorError::InsufficientCustody),
            Box::new(OpentutorError::OfferNotFound(OfferId(9))),
            Box::new(OpentutorError::InvalidRating(0)),
            Box::new(OpentutorError::AlreadyReviewed {
                reason: "test".into(),
            }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("OT_ERR_"),
                "Error missing OT_ERR_ prefix: {msg}"
            );
        }
    }
}
