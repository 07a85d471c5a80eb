use std::fmt;

use serde::{Deserialize, Serialize};

/// Which venue receives the capital.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    ToVenueA,
    ToVenueB,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::ToVenueA => "to_venue_a",
            Direction::ToVenueB => "to_venue_b",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully specified reallocation, built once per decision cycle.
///
/// `supplemental_amount` is the part of `shift_amount` drawn from the
/// flash-liquidity source; the remainder comes out of the pool itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReallocationAction {
    pub direction: Direction,
    pub shift_pct: u8,
    pub shift_amount: u128,
    pub supplemental_amount: u128,
    pub primary_yield_bps: u32,
    pub secondary_yield_bps: u32,
    pub reason: String,
}

impl ReallocationAction {
    /// Amount contributed by the pool, excluding the supplemental draw.
    /// Zero when a record read back from storage carries a larger draw.
    #[inline]
    pub fn pool_contribution(&self) -> u128 {
        self.shift_amount.saturating_sub(self.supplemental_amount)
    }
}

/// Gas top-up request surfaced when the operational balance runs low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefuelRequest {
    pub operational_balance: u128,
    pub yield_amount: u128,
    pub skim_amount: u128,
}
