//! System-wide constants for the OpenTutor marketplace core.

/// Lowest admissible review rating.
pub const MIN_RATING: u8 = 1;

/// Highest admissible review rating.
pub const MAX_RATING: u8 = 5;

/// Maximum royalty rate in basis points (10000 = 100%).
pub const MAX_ROYALTY_BPS: u16 = 10_000;

/// Course ids count up from 0.
pub const FIRST_COURSE_ID: u64 = 0;

/// Session offer ids count up from 1.
pub const FIRST_OFFER_ID: u64 = 1;

/// Enrollment token ids count up from 1 within each course.
pub const FIRST_TOKEN_ID: u64 = 1;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Platform name.
pub const PLATFORM_NAME: &str = "OpenTutor";
