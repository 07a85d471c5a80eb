//vibeshift_core/decide.rs

use tracing::debug;

use crate::{
    action::{Direction, ReallocationAction},
    arith::percent_of,
    cfg::ShiftCfg,
    snapshot::{CapitalPoolSnapshot, LiquidityVenueSnapshot},
};

/// Reported capacity of the flash-liquidity source.
///
/// Querying it may hit the network, so the engine only asks when the capped
/// pool contribution falls short of the optimal amount. Implementations
/// return 0 when the source is unavailable.
pub trait CapacitySource {
    fn supplemental_capacity(&self) -> u128;
}

impl<F> CapacitySource for F
where
    F: Fn() -> u128,
{
    fn supplemental_capacity(&self) -> u128 {
        self()
    }
}

/// Capacity source that never offers supplemental liquidity.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSupplement;

impl CapacitySource for NoSupplement {
    fn supplemental_capacity(&self) -> u128 {
        0
    }
}

/// Decide whether to move capital between venue A and venue B.
///
/// Returns `None` ("hold") when either snapshot is missing, the pool is
/// empty, or the yield divergence is below `cfg.yield_threshold_bps`.
/// A divergence exactly at the threshold acts.
pub fn decide<C>(
    venue: Option<&LiquidityVenueSnapshot>,
    pool: Option<&CapitalPoolSnapshot>,
    secondary_yield_bps: u32,
    cfg: &ShiftCfg,
    capacity: &C,
) -> Option<ReallocationAction>
where
    C: CapacitySource + ?Sized,
{
    let Some(venue) = venue else {
        debug!("venue snapshot unavailable, holding");
        return None;
    };
    let pool = match pool {
        Some(p) if p.balance > 0 => p,
        _ => {
            debug!("pool empty or unavailable, holding");
            return None;
        }
    };

    let primary_yield_bps = venue.fee_rate_bps;
    let diff = primary_yield_bps.abs_diff(secondary_yield_bps);
    debug!(primary_yield_bps, secondary_yield_bps, diff_bps = diff, "yield comparison");

    if diff < cfg.yield_threshold_bps {
        debug!(threshold_bps = cfg.yield_threshold_bps, "below threshold, holding");
        return None;
    }

    let direction = if primary_yield_bps > secondary_yield_bps {
        Direction::ToVenueA
    } else {
        Direction::ToVenueB
    };

    // 10 bps of divergence -> 1 percentage point of desired reallocation.
    let optimal_pct = diff / 10;
    let optimal_amount = percent_of(pool.balance, optimal_pct);

    // Never more than the whole pool, even with a misconfigured cap.
    let cap = cfg.max_shift_pct.min(100);
    let shift_pct = optimal_pct.min(cap as u32) as u8;
    let vault_contribution = percent_of(pool.balance, shift_pct as u32);

    let supplemental_amount = if optimal_amount > vault_contribution {
        let shortfall = optimal_amount - vault_contribution;
        let available = capacity.supplemental_capacity();
        debug!(shortfall, available, "capped contribution short of optimal");
        shortfall.min(available)
    } else {
        0
    };

    let shift_amount = vault_contribution.saturating_add(supplemental_amount);

    Some(ReallocationAction {
        direction,
        shift_pct,
        shift_amount,
        supplemental_amount,
        primary_yield_bps,
        secondary_yield_bps,
        reason: reason(primary_yield_bps, secondary_yield_bps, shift_pct, direction, supplemental_amount),
    })
}

/// Same decision with no supplemental liquidity; never queries anything.
pub fn decide_without_supplement(
    venue: Option<&LiquidityVenueSnapshot>,
    pool: Option<&CapitalPoolSnapshot>,
    secondary_yield_bps: u32,
    cfg: &ShiftCfg,
) -> Option<ReallocationAction> {
    decide(venue, pool, secondary_yield_bps, cfg, &NoSupplement)
}

/// Audit summary; must be reproducible from the same inputs.
fn reason(
    primary_yield_bps: u32,
    secondary_yield_bps: u32,
    shift_pct: u8,
    direction: Direction,
    supplemental_amount: u128,
) -> String {
    let mut s = format!(
        "Venue A yield {primary_yield_bps}bps vs Venue B {secondary_yield_bps}bps, \
         shifting {shift_pct}% TVL {direction}"
    );
    if supplemental_amount > 0 {
        s.push_str(&format!(" (+ supplemental injection: {supplemental_amount})"));
    }
    s
}
