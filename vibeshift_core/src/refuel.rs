use crate::{action::RefuelRequest, arith::scale_floor, cfg::ShiftCfg, snapshot::CapitalPoolSnapshot};

/// Share of accrued yield that may be skimmed for gas: 50 / 10_000 = 0.5%.
pub const SKIM_NUM: u128 = 50;
pub const SKIM_DEN: u128 = 10_000;

/// Outcome of the operational-liquidity check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefuelAssessment {
    /// Balance at or above the configured minimum.
    Sufficient,
    /// Below the minimum, but the pool could not be read.
    PoolUnavailable,
    /// Below the minimum, but there is no yield to skim.
    NothingToSkim { yield_amount: u128 },
    Refuel(RefuelRequest),
}

/// Bounded skim: `min(gas_refuel_amount, yield * 50 / 10_000)`.
#[inline]
pub fn skim_amount(pool: &CapitalPoolSnapshot, cfg: &ShiftCfg) -> u128 {
    let max_skim = scale_floor(pool.yield_amount(), SKIM_NUM, SKIM_DEN);
    cfg.gas_refuel_amount.min(max_skim)
}

pub fn assess_refuel(
    operational_balance: u128,
    pool: Option<&CapitalPoolSnapshot>,
    cfg: &ShiftCfg,
) -> RefuelAssessment {
    if operational_balance >= cfg.gas_min_balance {
        return RefuelAssessment::Sufficient;
    }
    let Some(pool) = pool else {
        return RefuelAssessment::PoolUnavailable;
    };

    let yield_amount = pool.yield_amount();
    let skim = skim_amount(pool, cfg);
    if skim == 0 {
        return RefuelAssessment::NothingToSkim { yield_amount };
    }

    RefuelAssessment::Refuel(RefuelRequest {
        operational_balance,
        yield_amount,
        skim_amount: skim,
    })
}
