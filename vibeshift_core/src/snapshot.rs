use serde::{Deserialize, Serialize};

/// Point-in-time read of the liquidity venue (venue A).
///
/// `liquidity` and `current_price_indicator` are kept as decimal strings: the
/// ledger reports them as arbitrary-precision integers and the decision
/// engine never does arithmetic on them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityVenueSnapshot {
    pub fee_rate_bps: u32,
    pub liquidity: String,
    pub current_tick: i32,
    pub current_price_indicator: String,
}

/// Point-in-time read of the shared capital pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalPoolSnapshot {
    pub balance: u128,
    /// Outstanding claims against the pool (LP supply).
    pub liability_units: u128,
}

impl CapitalPoolSnapshot {
    pub fn new(balance: u128, liability_units: u128) -> Self {
        Self { balance, liability_units }
    }

    /// Accrued yield: whatever the pool holds beyond its liabilities.
    #[inline]
    pub fn yield_amount(&self) -> u128 {
        self.balance.saturating_sub(self.liability_units)
    }
}
