use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CfgError {
    #[error("max_shift_pct must be within 0..=100, got {0}")]
    MaxShiftOutOfRange(u8),
}

/// Strategy thresholds for the decision engine and the scheduler.
///
/// Collected once at startup and passed by reference; nothing here is read
/// from the environment at decision time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftCfg {
    /// Minimum yield divergence (bps) that triggers a reallocation.
    pub yield_threshold_bps: u32,
    /// Hard cap on the share of the pool moved in one cycle.
    pub max_shift_pct: u8,
    /// Minimum interval between two executed actions.
    pub cooldown_secs: u64,
    /// Operational (gas) balance below which a refuel is requested.
    pub gas_min_balance: u128,
    /// Upper bound on a single refuel skim.
    pub gas_refuel_amount: u128,
}

impl Default for ShiftCfg {
    fn default() -> Self {
        Self {
            yield_threshold_bps: 200,
            max_shift_pct: 40,
            cooldown_secs: 3600,
            gas_min_balance: 500_000_000, // 0.5 SUI in MIST
            gas_refuel_amount: 10_000_000,
        }
    }
}

impl ShiftCfg {
    pub fn validate(&self) -> Result<(), CfgError> {
        if self.max_shift_pct > 100 {
            return Err(CfgError::MaxShiftOutOfRange(self.max_shift_pct));
        }
        Ok(())
    }
}
