//! Collaborator layer: the narrow interfaces the sentinel talks to the outside world through.
//!
//! This module holds contracts, not clients:
//! - `Observations`: ledger reads resolved into plain snapshots
//! - `BlobStore`: opaque put/get of proof payloads
//! - `Executor`: handoff of decided actions to the component that signs and submits
//!
//! Implementations own their timeouts. A timeout or any other fetch failure is
//! reported as an absent value, never as a panic.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;

use vibeshift_core::{
    CapacitySource, CapitalPoolSnapshot, LiquidityVenueSnapshot, ReallocationAction, RefuelRequest,
};

/// Ledger-backed data source.
///
/// `None` means the object could not be read this cycle (RPC failure, missing
/// object, wrong object type). Callers treat it as "no data", not as zero.
pub trait Observations {
    fn fetch_venue_snapshot(&self, venue_id: &str) -> Option<LiquidityVenueSnapshot>;

    fn fetch_pool_snapshot(&self, pool_id: &str) -> Option<CapitalPoolSnapshot>;

    /// Yield currently offered by venue B, in bps.
    fn fetch_secondary_yield_bps(&self) -> u32;

    /// Flash-liquidity capacity at `venue_id`; 0 when unavailable.
    fn fetch_supplemental_capacity(&self, venue_id: &str) -> u128;

    /// Gas balance held by the agent address.
    fn fetch_operational_balance(&self, address: &str) -> Option<u128>;
}

/// Bridges an `Observations` source into the decision engine's capacity query.
///
/// With no supplemental venue configured the source is never queried.
pub struct VenueCapacity<'a, O: ?Sized> {
    obs: &'a O,
    venue_id: Option<&'a str>,
}

impl<'a, O: Observations + ?Sized> VenueCapacity<'a, O> {
    pub fn new(obs: &'a O, venue_id: Option<&'a str>) -> Self {
        Self { obs, venue_id }
    }
}

impl<O: Observations + ?Sized> CapacitySource for VenueCapacity<'_, O> {
    fn supplemental_capacity(&self) -> u128 {
        match self.venue_id {
            Some(id) => self.obs.fetch_supplemental_capacity(id),
            None => 0,
        }
    }
}

/// Identifier returned by the blob store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobId(pub String);

impl BlobId {
    pub fn new(id: impl Into<String>) -> Self {
        BlobId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("blob store unavailable: {0}")]
    Unavailable(String),
    #[error("blob {0} not found")]
    NotFound(BlobId),
}

/// Opaque byte storage for proof payloads.
///
/// A successful `put` is durable. The sentinel never retries a failed `put`
/// within the same cycle.
pub trait BlobStore {
    fn put(&self, bytes: &[u8], retention_epochs: u32) -> Result<BlobId, StoreError>;

    fn get(&self, id: &BlobId) -> Result<Vec<u8>, StoreError>;
}

/// In-process content-addressed store. Ids are the SHA-256 hex of the payload,
/// so storing identical bytes twice yields the same id.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<BlobId, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn content_id(bytes: &[u8]) -> BlobId {
    let digest = Sha256::digest(bytes);
    let mut s = String::with_capacity(digest.len() * 2);
    for b in digest.iter() {
        s.push_str(&format!("{b:02x}"));
    }
    BlobId(s)
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, bytes: &[u8], _retention_epochs: u32) -> Result<BlobId, StoreError> {
        let id = content_id(bytes);
        let mut guard = self.blobs.lock().unwrap_or_else(|e| e.into_inner());
        guard.entry(id.clone()).or_insert_with(|| bytes.to_vec());
        Ok(id)
    }

    fn get(&self, id: &BlobId) -> Result<Vec<u8>, StoreError> {
        let guard = self.blobs.lock().unwrap_or_else(|e| e.into_inner());
        guard.get(id).cloned().ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

/// Receives decisions for execution. Signing and submission live behind this
/// trait; the sentinel itself never holds keys.
pub trait Executor {
    fn submit_shift(&mut self, action: &ReallocationAction, proof: Option<&BlobId>);

    fn request_refuel(&mut self, request: &RefuelRequest);
}

/// Executor that only records the handoff in the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogExecutor;

impl Executor for LogExecutor {
    fn submit_shift(&mut self, action: &ReallocationAction, proof: Option<&BlobId>) {
        info!(
            direction = %action.direction,
            shift_amount = action.shift_amount,
            shift_pct = action.shift_pct,
            supplemental_amount = action.supplemental_amount,
            proof = proof.map(BlobId::as_str),
            "shift handed off for execution"
        );
    }

    fn request_refuel(&mut self, request: &RefuelRequest) {
        info!(
            skim_amount = request.skim_amount,
            yield_amount = request.yield_amount,
            operational_balance = request.operational_balance,
            "refuel handed off for execution"
        );
    }
}
