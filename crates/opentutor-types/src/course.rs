//! Course listing model.
//!
//! A course is a limited-edition access listing: at most `max_supply`
//! enrollment tokens will ever be minted against it. The record is created
//! by the market and mutated only through successful purchases
//! (`current_supply` increments).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, CourseId};

/// A course listing owned by the market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Sequential id, allocated from 0 by the market.
    pub id: CourseId,
    /// Course title.
    pub title: String,
    /// Short ticker-style symbol (e.g. "BLC101").
    pub symbol: String,
    /// Off-chain metadata reference (e.g. an IPFS URI). Opaque to the core.
    pub metadata_uri: String,
    /// The instructor who listed the course. Held the Instructor role at
    /// creation time.
    pub instructor: AccountId,
    /// Maximum number of enrollment tokens that will ever be minted.
    pub max_supply: u32,
    /// Tokens minted so far. Invariant: `current_supply <= max_supply`.
    pub current_supply: u32,
    /// Exact purchase price. Always positive.
    pub price: Decimal,
    /// Secondary-sale royalty rate in basis points (10000 = 100%).
    /// Reserved data: stored and surfaced, never wired into payment splits.
    pub royalty_bps: u16,
    /// When the listing was created.
    pub listed_at: DateTime<Utc>,
}

impl Course {
    /// Enrollment tokens still available for purchase.
    #[must_use]
    pub fn remaining_supply(&self) -> u32 {
        self.max_supply - self.current_supply
    }

    /// Whether every token has been minted.
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.current_supply >= self.max_supply
    }
}

/// Parameters for listing a new course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSpec {
    pub title: String,
    pub symbol: String,
    pub metadata_uri: String,
    pub max_supply: u32,
    pub price: Decimal,
    pub royalty_bps: u16,
}
