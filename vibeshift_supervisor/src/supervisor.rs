//! Cooldown-gated control loop.
//!
//! The sentinel is the only owner of `CooldownState`. Each tick runs, in order:
//! - the gas check (every tick, independent of cooldown)
//! - the cooldown gate
//! - when eligible: observe, decide, seal + store the proof, hand off
//!
//! One tick never overlaps another. Failures of any collaborator are logged
//! and the tick completes; nothing here ends the loop except cancellation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use vibeshift_core::{
    assess_refuel, decide, decide_without_supplement, CapitalPoolSnapshot, CooldownState,
    LiquidityVenueSnapshot, ReallocationAction, RefuelAssessment,
};

use crate::adapter::{BlobId, BlobStore, Executor, LogExecutor, Observations, VenueCapacity};
use crate::error::{Result, SentinelError};
use crate::proof::{encode_proof, ProofRecord};
use crate::report::{GasReport, StatusReport, BASE_UNITS_PER_WHOLE};
use crate::runtime::{CancelToken, Clock, SystemClock};
use crate::settings::SentinelSettings;

/// Result of the decision half of a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Inside the cooldown window; nothing was observed or decided.
    CoolingDown { remaining_secs: u64 },
    /// Evaluated, no action (missing data, empty pool, or below threshold).
    Hold,
    Acted {
        action: ReallocationAction,
        /// `None` when the proof could not be stored.
        proof: Option<BlobId>,
    },
}

/// Result of the gas half of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GasCheck {
    /// No agent address configured.
    Skipped,
    BalanceUnavailable,
    Assessed(RefuelAssessment),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub at: u64,
    pub gas: GasCheck,
    pub cycle: CycleOutcome,
}

/// Persistable copy of the scheduler state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentinelSnapshot {
    pub cooldown: CooldownState,
}

pub struct Sentinel<O, S, E = LogExecutor, C = SystemClock> {
    settings: SentinelSettings,
    observations: O,
    store: S,
    executor: E,
    clock: C,
    cooldown: CooldownState,
}

impl<O, S> Sentinel<O, S>
where
    O: Observations,
    S: BlobStore,
{
    pub fn new(settings: SentinelSettings, observations: O, store: S) -> Self {
        Self {
            settings,
            observations,
            store,
            executor: LogExecutor,
            clock: SystemClock,
            cooldown: CooldownState::default(),
        }
    }
}

impl<O, S, E, C> Sentinel<O, S, E, C>
where
    O: Observations,
    S: BlobStore,
    E: Executor,
    C: Clock,
{
    pub fn with_executor<E2: Executor>(self, executor: E2) -> Sentinel<O, S, E2, C> {
        Sentinel {
            settings: self.settings,
            observations: self.observations,
            store: self.store,
            executor,
            clock: self.clock,
            cooldown: self.cooldown,
        }
    }

    pub fn with_clock<C2: Clock>(self, clock: C2) -> Sentinel<O, S, E, C2> {
        Sentinel {
            settings: self.settings,
            observations: self.observations,
            store: self.store,
            executor: self.executor,
            clock,
            cooldown: self.cooldown,
        }
    }

    pub fn settings(&self) -> &SentinelSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn cooldown(&self) -> CooldownState {
        self.cooldown
    }

    pub fn snapshot(&self) -> SentinelSnapshot {
        SentinelSnapshot { cooldown: self.cooldown }
    }

    /// Replace the scheduler state, e.g. after a restart.
    pub fn restore(&mut self, snap: SentinelSnapshot) {
        self.cooldown = snap.cooldown;
    }

    /// One pass of the control loop.
    pub fn tick(&mut self) -> TickReport {
        let now = self.clock.now_unix();
        let gas = self.check_gas();

        let cooldown_secs = self.settings.shift.cooldown_secs;
        let cycle = match self.cooldown.remaining(now, cooldown_secs) {
            Some(remaining_secs) => {
                info!(remaining_secs, "cooldown active");
                CycleOutcome::CoolingDown { remaining_secs }
            }
            None => match self.evaluate() {
                Some(action) => {
                    let proof = self.emit(&action, now);
                    self.cooldown.record_action(now);
                    CycleOutcome::Acted { action, proof }
                }
                None => CycleOutcome::Hold,
            },
        };

        TickReport { at: now, gas, cycle }
    }

    /// A single decision cycle that bypasses and does not touch the cooldown.
    pub fn run_once(&mut self) -> CycleOutcome {
        let now = self.clock.now_unix();
        match self.evaluate() {
            Some(action) => {
                let proof = self.emit(&action, now);
                CycleOutcome::Acted { action, proof }
            }
            None => CycleOutcome::Hold,
        }
    }

    /// Tick every `settings.tick_interval` until `cancel` fires.
    ///
    /// Cancellation is checked before each sleep and interrupts the sleep
    /// itself. Returns the number of ticks run.
    pub fn run_loop(&mut self, cancel: &CancelToken) -> u64 {
        let interval = self.settings.tick_interval;
        info!(interval_secs = interval.as_secs(), pool_id = %self.settings.pool_id, "starting sentinel");

        let mut ticks = 0u64;
        while !cancel.is_cancelled() {
            let report = self.tick();
            ticks += 1;
            debug!(at = report.at, cycle = ?report.cycle, gas = ?report.gas, "tick complete");

            if cancel.is_cancelled() || cancel.wait_timeout(interval) {
                break;
            }
        }

        info!(ticks, "sentinel stopped");
        ticks
    }

    /// Current observations and recommendation, with no side effects: the
    /// supplemental venue is not queried and nothing is stored or handed off.
    pub fn status(&self) -> StatusReport {
        let pool = self.observations.fetch_pool_snapshot(&self.settings.pool_id);
        let venue = self.observations.fetch_venue_snapshot(&self.settings.venue_id);
        let secondary_yield_bps = self.observations.fetch_secondary_yield_bps();
        let recommendation =
            decide_without_supplement(venue.as_ref(), pool.as_ref(), secondary_yield_bps, &self.settings.shift);

        StatusReport {
            pool,
            venue,
            secondary_yield_bps,
            shift: self.settings.shift.clone(),
            recommendation,
        }
    }

    /// Read-only view of the gas check.
    pub fn gas_status(&self) -> GasReport {
        let cfg = &self.settings.shift;
        let agent_address = self.settings.agent_address.clone();
        let balance = agent_address
            .as_deref()
            .and_then(|addr| self.observations.fetch_operational_balance(addr));
        let assessment = balance.map(|b| {
            if b >= cfg.gas_min_balance {
                RefuelAssessment::Sufficient
            } else {
                let pool = self.observations.fetch_pool_snapshot(&self.settings.pool_id);
                assess_refuel(b, pool.as_ref(), cfg)
            }
        });

        GasReport {
            agent_address,
            balance,
            min_balance: cfg.gas_min_balance,
            assessment,
        }
    }

    /// Gas check: runs every tick and hands refuel requests to the executor.
    pub fn check_gas(&mut self) -> GasCheck {
        let Some(address) = self.settings.agent_address.as_deref() else {
            debug!("agent address not set, gas check skipped");
            return GasCheck::Skipped;
        };
        let Some(balance) = self.observations.fetch_operational_balance(address) else {
            warn!(address, "gas balance unavailable");
            return GasCheck::BalanceUnavailable;
        };

        let cfg = &self.settings.shift;
        if balance >= cfg.gas_min_balance {
            debug!(balance, "gas sufficient");
            return GasCheck::Assessed(RefuelAssessment::Sufficient);
        }

        warn!(
            balance,
            whole_units = balance as f64 / BASE_UNITS_PER_WHOLE as f64,
            min_balance = cfg.gas_min_balance,
            "low gas, assessing refuel"
        );
        let pool = self.observations.fetch_pool_snapshot(&self.settings.pool_id);
        let assessment = assess_refuel(balance, pool.as_ref(), cfg);
        match &assessment {
            RefuelAssessment::Refuel(req) => {
                info!(
                    skim_amount = req.skim_amount,
                    yield_amount = req.yield_amount,
                    "requesting refuel from pool yield"
                );
                self.executor.request_refuel(req);
            }
            RefuelAssessment::NothingToSkim { yield_amount } => {
                warn!(yield_amount, "no yield available to skim for gas");
            }
            RefuelAssessment::PoolUnavailable => {
                warn!(pool_id = %self.settings.pool_id, "cannot read pool yield for refuel");
            }
            RefuelAssessment::Sufficient => {}
        }
        GasCheck::Assessed(assessment)
    }

    fn observe(&self) -> Result<(LiquidityVenueSnapshot, CapitalPoolSnapshot)> {
        let venue = self
            .observations
            .fetch_venue_snapshot(&self.settings.venue_id)
            .ok_or(SentinelError::DataUnavailable("venue snapshot"))?;
        let pool = self
            .observations
            .fetch_pool_snapshot(&self.settings.pool_id)
            .ok_or(SentinelError::DataUnavailable("pool snapshot"))?;
        Ok((venue, pool))
    }

    fn evaluate(&self) -> Option<ReallocationAction> {
        let (venue, pool) = match self.observe() {
            Ok(snapshots) => snapshots,
            Err(e) => {
                warn!(error = %e, "holding this cycle");
                return None;
            }
        };
        let secondary_yield_bps = self.observations.fetch_secondary_yield_bps();
        info!(
            primary_yield_bps = venue.fee_rate_bps,
            secondary_yield_bps,
            diff_bps = venue.fee_rate_bps.abs_diff(secondary_yield_bps),
            balance = pool.balance,
            "observed"
        );

        let capacity = VenueCapacity::new(&self.observations, self.settings.supplemental_venue());
        let action = decide(Some(&venue), Some(&pool), secondary_yield_bps, &self.settings.shift, &capacity);
        if action.is_none() {
            info!(threshold_bps = self.settings.shift.yield_threshold_bps, "holding");
        }
        action
    }

    /// Persist the proof and hand the action off. Store failures are logged
    /// and do not stop the handoff.
    fn emit(&mut self, action: &ReallocationAction, now: u64) -> Option<BlobId> {
        info!(reason = %action.reason, "action");

        let proof = match self.store_proof(action, now) {
            Ok(id) => {
                info!(blob_id = %id, sealed = self.settings.seal_secret.is_some(), "proof stored");
                Some(id)
            }
            Err(e) => {
                warn!(error = %e, "proof not stored");
                None
            }
        };

        if action.supplemental_amount > 0 {
            info!(
                pool_amount = action.pool_contribution(),
                supplemental_amount = action.supplemental_amount,
                total = action.shift_amount,
                "liquidity injection active"
            );
        }

        self.executor.submit_shift(action, proof.as_ref());
        proof
    }

    fn store_proof(&self, action: &ReallocationAction, now: u64) -> Result<BlobId> {
        let record = ProofRecord::at_unix(action, &self.settings.pool_id, now);
        let bytes = encode_proof(&record, self.settings.seal_secret())?;
        Ok(self.store.put(&bytes, self.settings.retention_epochs)?)
    }
}
