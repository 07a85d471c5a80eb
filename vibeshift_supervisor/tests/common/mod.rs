#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vibeshift_core::{CapitalPoolSnapshot, LiquidityVenueSnapshot, ReallocationAction, RefuelRequest};
use vibeshift_supervisor::{
    BlobId, BlobStore, CancelToken, Clock, Executor, Observations, SentinelSettings, StoreError,
};

pub const POOL_ID: &str = "0xvault";
pub const VENUE_ID: &str = "0xvenue";
pub const FLASH_VENUE_ID: &str = "0xflash";
pub const AGENT: &str = "0xagent";
pub const T0: u64 = 1_700_000_000;

/// Mutable ledger state plus fetch counters.
#[derive(Debug, Default)]
pub struct World {
    pub venue: Option<LiquidityVenueSnapshot>,
    pub pool: Option<CapitalPoolSnapshot>,
    pub secondary_yield_bps: u32,
    pub capacity: u128,
    pub gas: Option<u128>,

    pub venue_fetches: u32,
    pub pool_fetches: u32,
    pub capacity_fetches: u32,
    pub gas_fetches: u32,
}

#[derive(Clone, Default)]
pub struct FakeLedger(pub Rc<RefCell<World>>);

impl FakeLedger {
    pub fn with(f: impl FnOnce(&mut World)) -> Self {
        let ledger = FakeLedger::default();
        f(&mut ledger.0.borrow_mut());
        ledger
    }

    pub fn world(&self) -> std::cell::RefMut<'_, World> {
        self.0.borrow_mut()
    }
}

impl Observations for FakeLedger {
    fn fetch_venue_snapshot(&self, venue_id: &str) -> Option<LiquidityVenueSnapshot> {
        assert_eq!(venue_id, VENUE_ID);
        let mut w = self.0.borrow_mut();
        w.venue_fetches += 1;
        w.venue.clone()
    }

    fn fetch_pool_snapshot(&self, pool_id: &str) -> Option<CapitalPoolSnapshot> {
        assert_eq!(pool_id, POOL_ID);
        let mut w = self.0.borrow_mut();
        w.pool_fetches += 1;
        w.pool
    }

    fn fetch_secondary_yield_bps(&self) -> u32 {
        self.0.borrow().secondary_yield_bps
    }

    fn fetch_supplemental_capacity(&self, venue_id: &str) -> u128 {
        assert_eq!(venue_id, FLASH_VENUE_ID);
        let mut w = self.0.borrow_mut();
        w.capacity_fetches += 1;
        w.capacity
    }

    fn fetch_operational_balance(&self, address: &str) -> Option<u128> {
        assert_eq!(address, AGENT);
        let mut w = self.0.borrow_mut();
        w.gas_fetches += 1;
        w.gas
    }
}

pub fn venue(fee_rate_bps: u32) -> LiquidityVenueSnapshot {
    LiquidityVenueSnapshot {
        fee_rate_bps,
        liquidity: "5000000000".to_string(),
        current_tick: 42,
        current_price_indicator: "18446744073709551616".to_string(),
    }
}

#[derive(Clone)]
pub struct ManualClock(pub Rc<Cell<u64>>);

impl ManualClock {
    pub fn at(t: u64) -> Self {
        ManualClock(Rc::new(Cell::new(t)))
    }

    pub fn set(&self, t: u64) {
        self.0.set(t);
    }
}

impl Clock for ManualClock {
    fn now_unix(&self) -> u64 {
        self.0.get()
    }
}

#[derive(Debug, Default)]
pub struct Handoffs {
    pub shifts: Vec<(ReallocationAction, Option<BlobId>)>,
    pub refuels: Vec<RefuelRequest>,
}

/// Records handoffs; optionally cancels the loop after the first shift.
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    pub log: Rc<RefCell<Handoffs>>,
    pub cancel_on_shift: Option<CancelToken>,
}

impl Executor for RecordingExecutor {
    fn submit_shift(&mut self, action: &ReallocationAction, proof: Option<&BlobId>) {
        self.log.borrow_mut().shifts.push((action.clone(), proof.cloned()));
        if let Some(token) = &self.cancel_on_shift {
            token.cancel();
        }
    }

    fn request_refuel(&mut self, request: &RefuelRequest) {
        self.log.borrow_mut().refuels.push(*request);
    }
}

/// Store whose every call fails.
#[derive(Clone, Copy, Default)]
pub struct DownStore;

impl BlobStore for DownStore {
    fn put(&self, _bytes: &[u8], _retention_epochs: u32) -> Result<BlobId, StoreError> {
        Err(StoreError::Unavailable("publisher returned 503".to_string()))
    }

    fn get(&self, _id: &BlobId) -> Result<Vec<u8>, StoreError> {
        Err(StoreError::Unavailable("aggregator returned 503".to_string()))
    }
}

pub fn settings() -> SentinelSettings {
    let mut s = SentinelSettings::new(POOL_ID);
    s.venue_id = VENUE_ID.to_string();
    s.supplemental_venue_id = Some(FLASH_VENUE_ID.to_string());
    s.agent_address = None;
    s.seal_secret = Some("vault-secret".to_string());
    s
}
