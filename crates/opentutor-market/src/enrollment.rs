//! Per-course enrollment ledger.
//!
//! Each course gets its own ledger at listing time, tracking which students
//! hold an access token and which token id each one received. The ledger is
//! owned by the market; the privileged-mint rule ("only the market may
//! mint") is enforced with an explicit capability check, not by module
//! convention: every mint must present the [`MintAuthority`] the market
//! created the ledger with.

use std::collections::HashMap;

use opentutor_types::{AccountId, CourseId, OpentutorError, Result, TokenId, constants};
use uuid::Uuid;

/// Opaque capability token proving the caller is the owning market.
///
/// The ledger stores a copy at creation; this is a non-owning back-reference
/// used only for the equality check — no cycle, no shared mutability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintAuthority(Uuid);

impl MintAuthority {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

/// Tracks minted access tokens and enrolled students for one course.
pub struct EnrollmentLedger {
    /// The course this ledger belongs to.
    course_id: CourseId,
    /// The instructor who listed the course.
    instructor: AccountId,
    /// The owning market's mint capability.
    authority: MintAuthority,
    /// Enrollment records: student → token id. At most one per student.
    enrollments: HashMap<AccountId, TokenId>,
    /// Next token id to mint. Token ids count up from 1 within the course.
    next_token_id: TokenId,
}

impl EnrollmentLedger {
    pub(crate) fn new(course_id: CourseId, instructor: AccountId, authority: MintAuthority) -> Self {
        Self {
            course_id,
            instructor,
            authority,
            enrollments: HashMap::new(),
            next_token_id: TokenId(constants::FIRST_TOKEN_ID),
        }
    }

    /// Mint an enrollment token for `student`. Privileged: only the owning
    /// market holds the matching [`MintAuthority`].
    ///
    /// # Errors
    /// - `NotMintAuthority` if `authority` is not the market's token
    /// - `AlreadyEnrolled` if the student already holds a token
    pub fn mint(&mut self, authority: &MintAuthority, student: AccountId) -> Result<TokenId> {
        if *authority != self.authority {
            return Err(OpentutorError::NotMintAuthority(self.course_id));
        }
        if self.enrollments.contains_key(&student) {
            return Err(OpentutorError::AlreadyEnrolled {
                course_id: self.course_id,
                student,
            });
        }

        let token_id = self.next_token_id;
        self.next_token_id = token_id.next();
        self.enrollments.insert(student, token_id);
        Ok(token_id)
    }

    /// Whether `student` holds an enrollment token for this course.
    #[must_use]
    pub fn is_enrolled(&self, student: AccountId) -> bool {
        self.enrollments.contains_key(&student)
    }

    /// The token id minted to `student`, if any.
    #[must_use]
    pub fn token_of(&self, student: AccountId) -> Option<TokenId> {
        self.enrollments.get(&student).copied()
    }

    /// Number of tokens minted so far.
    #[must_use]
    pub fn minted(&self) -> usize {
        self.enrollments.len()
    }

    /// The course this ledger belongs to.
    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    /// The instructor the ledger was scoped to at creation.
    #[must_use]
    pub fn instructor(&self) -> AccountId {
        self.instructor
    }
}
