//! Operator-facing summaries. Floating point appears here only to render
//! base-unit balances as whole units; nothing here feeds a decision.

use std::fmt;

use vibeshift_core::{
    CapitalPoolSnapshot, LiquidityVenueSnapshot, ReallocationAction, RefuelAssessment, ShiftCfg,
};

/// Base units per whole unit of the gas asset (MIST per SUI).
pub const BASE_UNITS_PER_WHOLE: u128 = 1_000_000_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusReport {
    pub pool: Option<CapitalPoolSnapshot>,
    pub venue: Option<LiquidityVenueSnapshot>,
    pub secondary_yield_bps: u32,
    pub shift: ShiftCfg,
    /// Decision for the current observations, ignoring cooldown and
    /// supplemental liquidity.
    pub recommendation: Option<ReallocationAction>,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== VibeShift Sentinel Status ===")?;
        match &self.pool {
            Some(p) => {
                writeln!(f, "Pool Balance:        {}", group_thousands(p.balance))?;
                writeln!(f, "Pool Liabilities:    {}", group_thousands(p.liability_units))?;
            }
            None => writeln!(f, "Pool: not found / not configured")?,
        }
        match &self.venue {
            Some(v) => {
                writeln!(f, "Venue A Fee Rate:    {} bps", v.fee_rate_bps)?;
                writeln!(f, "Venue A Liquidity:   {}", v.liquidity)?;
                writeln!(f, "Venue A Tick:        {}", v.current_tick)?;
            }
            None => writeln!(f, "Venue A: not found")?,
        }
        writeln!(f, "Venue B Yield:       {} bps", self.secondary_yield_bps)?;
        writeln!(f, "Threshold:           {} bps", self.shift.yield_threshold_bps)?;
        writeln!(f, "Max Shift:           {}%", self.shift.max_shift_pct)?;
        writeln!(f, "Cooldown:            {}s", self.shift.cooldown_secs)?;
        writeln!(f)?;
        match &self.recommendation {
            Some(a) => write!(f, "Recommendation: {}", a.reason),
            None => write!(f, "Recommendation: HOLD"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GasReport {
    pub agent_address: Option<String>,
    pub balance: Option<u128>,
    pub min_balance: u128,
    /// `None` when the balance could not be read.
    pub assessment: Option<RefuelAssessment>,
}

impl GasReport {
    pub fn needs_refuel(&self) -> bool {
        !matches!(self.assessment, None | Some(RefuelAssessment::Sufficient))
    }
}

impl fmt::Display for GasReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Agent Address:  {}", self.agent_address.as_deref().unwrap_or("(not set)"))?;
        match self.balance {
            Some(b) => writeln!(f, "Gas Balance:    {:.4} ({} base units)", whole_units(b), b)?,
            None => writeln!(f, "Gas Balance:    unavailable")?,
        }
        writeln!(f, "Min Threshold:  {:.4}", whole_units(self.min_balance))?;
        match &self.assessment {
            None => write!(f, "Status:         UNKNOWN"),
            Some(RefuelAssessment::Sufficient) => write!(f, "Status:         OK"),
            Some(RefuelAssessment::Refuel(req)) => {
                writeln!(f, "Status:         REFUEL NEEDED")?;
                write!(f, "Refuel Skim:    {} (from yield {})", req.skim_amount, req.yield_amount)
            }
            Some(RefuelAssessment::NothingToSkim { yield_amount }) => {
                writeln!(f, "Status:         REFUEL NEEDED")?;
                write!(f, "Refuel Skim:    none available (yield {yield_amount})")
            }
            Some(RefuelAssessment::PoolUnavailable) => {
                writeln!(f, "Status:         REFUEL NEEDED")?;
                write!(f, "Refuel Skim:    pool unavailable")
            }
        }
    }
}

fn whole_units(base: u128) -> f64 {
    base as f64 / BASE_UNITS_PER_WHOLE as f64
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn gas_report_renders_whole_units() {
        let r = GasReport {
            agent_address: None,
            balance: Some(250_000_000),
            min_balance: 500_000_000,
            assessment: Some(RefuelAssessment::PoolUnavailable),
        };
        let s = r.to_string();
        assert!(s.contains("(not set)"));
        assert!(s.contains("0.2500 (250000000 base units)"));
        assert!(s.contains("0.5000"));
        assert!(s.contains("REFUEL NEEDED"));
        assert!(r.needs_refuel());
    }
}
