//! Audit proofs: one JSON record per executed decision, sealed when a secret
//! is configured, then put to the blob store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vibeshift_core::{seal, unseal, Direction, ReallocationAction, SealedEnvelope};

use crate::adapter::{BlobId, BlobStore};
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    /// UTC, second precision, e.g. `2026-10-16T09:30:00Z`.
    pub timestamp: String,
    pub pool_id: String,
    pub direction: Direction,
    pub shift_pct: u8,
    pub shift_amount: u128,
    pub reason: String,
    pub primary_yield_bps: u32,
    pub secondary_yield_bps: u32,
    pub supplemental_amount: u128,
}

impl ProofRecord {
    pub fn new(action: &ReallocationAction, pool_id: &str, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            pool_id: pool_id.to_string(),
            direction: action.direction,
            shift_pct: action.shift_pct,
            shift_amount: action.shift_amount,
            reason: action.reason.clone(),
            primary_yield_bps: action.primary_yield_bps,
            secondary_yield_bps: action.secondary_yield_bps,
            supplemental_amount: action.supplemental_amount,
        }
    }

    /// Record stamped with a unix-seconds clock reading.
    pub fn at_unix(action: &ReallocationAction, pool_id: &str, unix_secs: u64) -> Self {
        let at = i64::try_from(unix_secs)
            .ok()
            .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
            .unwrap_or_default();
        Self::new(action, pool_id, at)
    }

    pub fn action(&self) -> ReallocationAction {
        ReallocationAction {
            direction: self.direction,
            shift_pct: self.shift_pct,
            shift_amount: self.shift_amount,
            supplemental_amount: self.supplemental_amount,
            primary_yield_bps: self.primary_yield_bps,
            secondary_yield_bps: self.secondary_yield_bps,
            reason: self.reason.clone(),
        }
    }
}

/// Bytes to put to the store: the sealed envelope when `secret` is set,
/// otherwise the plain record JSON.
pub fn encode_proof(record: &ProofRecord, secret: Option<&[u8]>) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(record)?;
    match secret {
        Some(secret) => {
            let envelope = seal(&json, secret, &record.pool_id)?;
            Ok(envelope.to_json()?.into_bytes())
        }
        None => Ok(json),
    }
}

/// Decode stored proof bytes; the inverse of [`encode_proof`].
pub fn decode_proof(bytes: &[u8], pool_id: &str, secret: Option<&[u8]>) -> Result<ProofRecord> {
    match secret {
        Some(secret) => {
            let envelope = SealedEnvelope::from_json(bytes)?;
            let plain = unseal(&envelope, secret, pool_id)?;
            Ok(serde_json::from_slice(&plain)?)
        }
        None => Ok(serde_json::from_slice(bytes)?),
    }
}

/// Fetch a stored proof and open it.
pub fn open_proof<S>(store: &S, id: &BlobId, pool_id: &str, secret: Option<&[u8]>) -> Result<ProofRecord>
where
    S: BlobStore + ?Sized,
{
    let bytes = store.get(id)?;
    decode_proof(&bytes, pool_id, secret)
}
