use std::cell::Cell;

use vibeshift_core::*;

fn venue(fee_rate_bps: u32) -> LiquidityVenueSnapshot {
    LiquidityVenueSnapshot {
        fee_rate_bps,
        liquidity: "340282366920938463463374607431768211455".to_string(),
        current_tick: -12,
        current_price_indicator: "18446744073709551616".to_string(),
    }
}

fn cfg(threshold: u32, max_shift_pct: u8) -> ShiftCfg {
    ShiftCfg { yield_threshold_bps: threshold, max_shift_pct, ..ShiftCfg::default() }
}

#[test]
fn capped_shift_without_supplement() {
    let pool = CapitalPoolSnapshot::new(1_000_000, 900_000);
    let a = decide(Some(&venue(800)), Some(&pool), 500, &cfg(200, 40), &NoSupplement).unwrap();
    assert_eq!(a.direction, Direction::ToVenueA);
    assert_eq!(a.shift_pct, 30);
    assert_eq!(a.shift_amount, 300_000);
    assert_eq!(a.supplemental_amount, 0);
    assert_eq!(a.primary_yield_bps, 800);
    assert_eq!(a.secondary_yield_bps, 500);
    assert_eq!(a.reason, "Venue A yield 800bps vs Venue B 500bps, shifting 30% TVL to_venue_a");
}

#[test]
fn shortfall_drawn_from_supplemental_capacity() {
    let pool = CapitalPoolSnapshot::new(1_000_000, 0);
    let cap = || 150_000u128;
    let a = decide(Some(&venue(1000)), Some(&pool), 500, &cfg(200, 40), &cap).unwrap();
    assert_eq!(a.shift_pct, 40);
    assert_eq!(a.supplemental_amount, 100_000);
    assert_eq!(a.shift_amount, 500_000);
    assert_eq!(a.pool_contribution(), 400_000);
    assert_eq!(
        a.reason,
        "Venue A yield 1000bps vs Venue B 500bps, shifting 40% TVL to_venue_a (+ supplemental injection: 100000)"
    );
}

#[test]
fn supplement_bounded_by_capacity() {
    let pool = CapitalPoolSnapshot::new(1_000_000, 0);
    let cap = || 30_000u128;
    let a = decide(Some(&venue(1000)), Some(&pool), 500, &cfg(200, 40), &cap).unwrap();
    assert_eq!(a.supplemental_amount, 30_000);
    assert_eq!(a.shift_amount, 430_000);
}

#[test]
fn zero_capacity_means_smaller_shift() {
    let pool = CapitalPoolSnapshot::new(1_000_000, 0);
    let cap = || 0u128;
    let a = decide(Some(&venue(1000)), Some(&pool), 500, &cfg(200, 40), &cap).unwrap();
    assert_eq!(a.supplemental_amount, 0);
    assert_eq!(a.shift_amount, 400_000);
    assert!(!a.reason.contains("supplemental"));
}

#[test]
fn capacity_not_queried_without_shortfall() {
    let calls = Cell::new(0u32);
    let cap = || {
        calls.set(calls.get() + 1);
        1_000u128
    };
    let pool = CapitalPoolSnapshot::new(1_000_000, 0);
    decide(Some(&venue(800)), Some(&pool), 500, &cfg(200, 40), &cap).unwrap();
    assert_eq!(calls.get(), 0);

    decide(Some(&venue(1000)), Some(&pool), 500, &cfg(200, 40), &cap).unwrap();
    assert_eq!(calls.get(), 1);
}

#[test]
fn below_threshold_holds() {
    let pool = CapitalPoolSnapshot::new(1_000_000, 0);
    for primary in [500u32, 501, 650, 699, 301, 350] {
        assert_eq!(decide(Some(&venue(primary)), Some(&pool), 500, &cfg(200, 40), &NoSupplement), None);
    }
}

#[test]
fn threshold_is_inclusive() {
    let pool = CapitalPoolSnapshot::new(1_000_000, 0);
    let a = decide(Some(&venue(700)), Some(&pool), 500, &cfg(200, 40), &NoSupplement).unwrap();
    assert_eq!(a.shift_pct, 20);
    assert_eq!(a.shift_amount, 200_000);
}

#[test]
fn lower_primary_moves_to_venue_b() {
    let pool = CapitalPoolSnapshot::new(1_000_000, 0);
    let a = decide(Some(&venue(200)), Some(&pool), 500, &cfg(200, 40), &NoSupplement).unwrap();
    assert_eq!(a.direction, Direction::ToVenueB);
    assert_eq!(a.shift_pct, 30);
    assert!(a.reason.ends_with("to_venue_b"));
}

#[test]
fn empty_or_missing_inputs_hold() {
    let c = cfg(200, 40);
    let empty = CapitalPoolSnapshot::new(0, 0);
    let full = CapitalPoolSnapshot::new(1_000_000, 0);
    assert_eq!(decide(Some(&venue(5000)), Some(&empty), 0, &c, &NoSupplement), None);
    assert_eq!(decide(None, Some(&full), 0, &c, &NoSupplement), None);
    assert_eq!(decide(Some(&venue(5000)), None, 0, &c, &NoSupplement), None);
}

#[test]
fn extreme_divergence_never_exceeds_cap() {
    let pool = CapitalPoolSnapshot::new(1_000_000, 0);
    let capacity = 5_000_000u128;
    let cap = move || capacity;
    for max in [0u8, 1, 40, 100] {
        let c = cfg(1, max);
        for primary in [10u32, 999, 5_000, 100_000, u32::MAX] {
            let a = decide(Some(&venue(primary)), Some(&pool), 0, &c, &cap).unwrap();
            assert!(a.shift_pct <= max);
            assert!(a.supplemental_amount <= a.shift_amount);
            assert!(a.shift_amount <= pool.balance + capacity);
        }
    }
}

#[test]
fn cap_above_hundred_is_clamped() {
    let pool = CapitalPoolSnapshot::new(1_000, 0);
    let a = decide_without_supplement(Some(&venue(5_000)), Some(&pool), 0, &cfg(200, 250)).unwrap();
    assert_eq!(a.shift_pct, 100);
    assert_eq!(a.shift_amount, 1_000);
    assert!(cfg(200, 250).validate().is_err());
    assert!(ShiftCfg::default().validate().is_ok());
}

#[test]
fn huge_balance_does_not_overflow() {
    let pool = CapitalPoolSnapshot::new(u128::MAX, 0);
    let a = decide_without_supplement(Some(&venue(900)), Some(&pool), 500, &cfg(200, 40)).unwrap();
    assert_eq!(a.shift_amount, (u128::MAX / 100) * 40 + (u128::MAX % 100) * 40 / 100);
}

#[test]
fn cooldown_window() {
    let mut st = CooldownState::default();
    assert!(st.is_eligible(1_700_000_000, 3600));

    st.record_action(1_700_000_000);
    assert_eq!(st.remaining(1_700_000_000 + 3599, 3600), Some(1));
    assert!(!st.is_eligible(1_700_000_000 + 3599, 3600));
    assert!(st.is_eligible(1_700_000_000 + 3600, 3600));

    // Clock going backwards stays in cooldown instead of underflowing.
    assert_eq!(st.remaining(1_600_000_000, 3600), Some(3600));
}

#[test]
fn refuel_skim_bounded() {
    let c = ShiftCfg::default();

    // 0.5% of 1_000_000_000 yield = 5_000_000 < refuel cap.
    let pool = CapitalPoolSnapshot::new(3_000_000_000, 2_000_000_000);
    assert_eq!(
        assess_refuel(100, Some(&pool), &c),
        RefuelAssessment::Refuel(RefuelRequest {
            operational_balance: 100,
            yield_amount: 1_000_000_000,
            skim_amount: 5_000_000,
        })
    );

    // Large yield: capped at gas_refuel_amount.
    let rich = CapitalPoolSnapshot::new(100_000_000_000, 0);
    assert_eq!(skim_amount(&rich, &c), c.gas_refuel_amount);
}

#[test]
fn refuel_not_needed_or_impossible() {
    let c = ShiftCfg::default();
    let pool = CapitalPoolSnapshot::new(1_000, 5_000);
    assert_eq!(assess_refuel(c.gas_min_balance, Some(&pool), &c), RefuelAssessment::Sufficient);
    assert_eq!(assess_refuel(0, None, &c), RefuelAssessment::PoolUnavailable);
    assert_eq!(
        assess_refuel(0, Some(&pool), &c),
        RefuelAssessment::NothingToSkim { yield_amount: 0 }
    );
    // 199 * 50 / 10000 truncates to 0.
    let dust = CapitalPoolSnapshot::new(199, 0);
    assert_eq!(
        assess_refuel(0, Some(&dust), &c),
        RefuelAssessment::NothingToSkim { yield_amount: 199 }
    );
}

#[test]
fn cfg_deserializes_with_defaults() {
    let c: ShiftCfg = serde_json::from_str(r#"{"max_shift_pct": 25}"#).unwrap();
    assert_eq!(c.max_shift_pct, 25);
    assert_eq!(c.yield_threshold_bps, 200);
    assert_eq!(c.cooldown_secs, 3600);
}
