//! The course market: listing creation and purchase settlement.

use std::collections::HashMap;

use chrono::Utc;
use opentutor_funds::Vault;
use opentutor_registry::IdentityRegistry;
use opentutor_types::{
    AccountId, Course, CourseId, CourseSpec, MarketEvent, OpentutorError, Result, TokenId,
    constants,
};
use rust_decimal::Decimal;

use crate::enrollment::{EnrollmentLedger, MintAuthority};

/// Owns every course record and its enrollment ledger. The only component
/// permitted to mutate course supply or mint enrollment tokens.
pub struct CourseMarket {
    /// All courses, keyed by their sequential id.
    courses: HashMap<CourseId, Course>,
    /// One enrollment ledger per course, created at listing time.
    ledgers: HashMap<CourseId, EnrollmentLedger>,
    /// Next course id to allocate. Course ids count up from 0.
    next_course_id: CourseId,
    /// The capability every ledger checks on mint.
    mint_authority: MintAuthority,
    /// Append-only event journal for external indexing.
    events: Vec<MarketEvent>,
}

impl CourseMarket {
    /// Create an empty market.
    #[must_use]
    pub fn new() -> Self {
        Self {
            courses: HashMap::new(),
            ledgers: HashMap::new(),
            next_course_id: CourseId(constants::FIRST_COURSE_ID),
            mint_authority: MintAuthority::new(),
            events: Vec::new(),
        }
    }

    /// List a new course. Caller must hold the Instructor role.
    ///
    /// Allocates the next sequential course id, creates the per-course
    /// enrollment ledger, and emits [`MarketEvent::CourseListed`].
    ///
    /// # Errors
    /// - `NotRegistered` / `WrongRole` if the caller is not a registered
    ///   Instructor
    /// - `InvalidArgument` if `max_supply` or `price` is not positive or
    ///   `royalty_bps` exceeds 10000
    pub fn create_course(
        &mut self,
        registry: &IdentityRegistry,
        caller: AccountId,
        spec: CourseSpec,
    ) -> Result<CourseId> {
        registry.require_instructor(caller)?;

        if spec.max_supply == 0 {
            return Err(OpentutorError::InvalidArgument {
                reason: "max_supply must be > 0".into(),
            });
        }
        if spec.price <= Decimal::ZERO {
            return Err(OpentutorError::InvalidArgument {
                reason: "price must be > 0".into(),
            });
        }
        if spec.royalty_bps > constants::MAX_ROYALTY_BPS {
            return Err(OpentutorError::InvalidArgument {
                reason: format!(
                    "royalty_bps {} exceeds {}",
                    spec.royalty_bps,
                    constants::MAX_ROYALTY_BPS
                ),
            });
        }

        let course_id = self.next_course_id;
        self.next_course_id = course_id.next();

        let course = Course {
            id: course_id,
            title: spec.title,
            symbol: spec.symbol,
            metadata_uri: spec.metadata_uri,
            instructor: caller,
            max_supply: spec.max_supply,
            current_supply: 0,
            price: spec.price,
            royalty_bps: spec.royalty_bps,
            listed_at: Utc::now(),
        };

        tracing::info!(
            course = %course_id,
            instructor = %caller,
            title = %course.title,
            max_supply = course.max_supply,
            price = %course.price,
            "course listed"
        );

        self.ledgers.insert(
            course_id,
            EnrollmentLedger::new(course_id, caller, self.mint_authority),
        );
        self.events.push(MarketEvent::CourseListed {
            course_id,
            instructor: caller,
            max_supply: course.max_supply,
            price: course.price,
        });
        self.courses.insert(course_id, course);

        Ok(course_id)
    }

    /// Purchase course access. Caller must be a registered Student paying
    /// the exact price; mints one enrollment token and pays the instructor.
    ///
    /// All checks run before any balance movement; all state mutations
    /// (supply increment, token mint) commit before the instructor payout.
    ///
    /// # Errors
    /// - `CourseNotFound` if the course does not exist
    /// - `NotRegistered` / `WrongRole` if the caller is not a registered
    ///   Student
    /// - `InsufficientPayment` if `payment != price` (strict equality;
    ///   overpayment is rejected, not refunded)
    /// - `AlreadyEnrolled` on a repeat purchase
    /// - `SupplyExhausted` once every token is minted
    /// - `InsufficientBalance` if the caller's vault balance cannot cover
    ///   the payment
    pub fn buy_course(
        &mut self,
        registry: &IdentityRegistry,
        vault: &mut Vault,
        caller: AccountId,
        course_id: CourseId,
        payment: Decimal,
    ) -> Result<TokenId> {
        let course = self
            .courses
            .get(&course_id)
            .ok_or(OpentutorError::CourseNotFound(course_id))?;

        registry.require_student(caller)?;

        if payment != course.price {
            return Err(OpentutorError::InsufficientPayment {
                required: course.price,
                provided: payment,
            });
        }

        let ledger = self
            .ledgers
            .get(&course_id)
            .ok_or(OpentutorError::CourseNotFound(course_id))?;
        if ledger.is_enrolled(caller) {
            return Err(OpentutorError::AlreadyEnrolled {
                course_id,
                student: caller,
            });
        }
        if course.is_sold_out() {
            return Err(OpentutorError::SupplyExhausted(course_id));
        }

        let available = vault.balance(caller);
        if available < payment {
            return Err(OpentutorError::InsufficientBalance {
                needed: payment,
                available,
            });
        }

        let instructor = course.instructor;
        let price = course.price;

        // Checks done. Commit every state mutation, then move the funds.
        let course = self
            .courses
            .get_mut(&course_id)
            .ok_or(OpentutorError::CourseNotFound(course_id))?;
        course.current_supply += 1;

        let ledger = self
            .ledgers
            .get_mut(&course_id)
            .ok_or(OpentutorError::CourseNotFound(course_id))?;
        let token_id = ledger.mint(&self.mint_authority, caller)?;

        vault.transfer(caller, instructor, price)?;

        tracing::info!(
            course = %course_id,
            student = %caller,
            token = %token_id,
            %price,
            "course purchased"
        );
        self.events.push(MarketEvent::CoursePurchased {
            course_id,
            student: caller,
            token_id,
            price,
        });

        Ok(token_id)
    }

    /// Read-only course lookup.
    #[must_use]
    pub fn course(&self, course_id: CourseId) -> Option<&Course> {
        self.courses.get(&course_id)
    }

    /// Whether `student` holds an enrollment token for `course_id`.
    #[must_use]
    pub fn is_enrolled(&self, course_id: CourseId, student: AccountId) -> bool {
        self.ledgers
            .get(&course_id)
            .is_some_and(|ledger| ledger.is_enrolled(student))
    }

    /// The enrollment token `student` holds for `course_id`, if any.
    #[must_use]
    pub fn enrollment(&self, course_id: CourseId, student: AccountId) -> Option<TokenId> {
        self.ledgers
            .get(&course_id)
            .and_then(|ledger| ledger.token_of(student))
    }

    /// The enrollment ledger for a course.
    #[must_use]
    pub fn ledger(&self, course_id: CourseId) -> Option<&EnrollmentLedger> {
        self.ledgers.get(&course_id)
    }

    /// Number of listed courses.
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
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

impl Default for CourseMarket {
    fn default() -> Self {
        Self::new()
    }
}
