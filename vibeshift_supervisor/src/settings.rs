//! Process settings, read once at startup.
//!
//! Variable names follow the deployed sentinel so existing environments keep
//! working. Everything downstream takes `&SentinelSettings`; nothing reads the
//! environment at decision time.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use vibeshift_core::ShiftCfg;

use crate::error::SettingsError;

pub const ENV_POOL_ID: &str = "VIBESHIFT_VAULT_ID";
pub const ENV_VENUE_ID: &str = "CETUS_SUI_USDC_POOL";
pub const ENV_SUPPLEMENTAL_VENUE_ID: &str = "DEEPBOOK_SUI_USDC_POOL";
pub const ENV_AGENT_ADDRESS: &str = "VIBESHIFT_AGENT_ADDRESS";
pub const ENV_SEAL_SECRET: &str = "VIBESHIFT_SEAL_SECRET";
pub const ENV_YIELD_THRESHOLD_BPS: &str = "YIELD_THRESHOLD_BPS";
pub const ENV_MAX_SHIFT_PCT: &str = "MAX_SHIFT_PCT";
pub const ENV_COOLDOWN_SECONDS: &str = "COOLDOWN_SECONDS";
pub const ENV_GAS_MIN_BALANCE: &str = "GAS_MIN_SUI_BALANCE";
pub const ENV_GAS_REFUEL_AMOUNT: &str = "GAS_REFUEL_AMOUNT";

const DEFAULT_VENUE_ID: &str = "0xcf994611fd4c48e277ce3ffd4d4364c914af2c3cbb05f7bf6facd371de688571";
const DEFAULT_SUPPLEMENTAL_VENUE_ID: &str =
    "0x1c19362ca52b8ffd7a33cee805a67d40f31e6ba303753fd3a4cfdfacea7163a5";

pub const DEFAULT_RETENTION_EPOCHS: u32 = 5;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(600);

#[derive(Clone)]
pub struct SentinelSettings {
    /// Capital pool (vault) object id. Also the seal salt.
    pub pool_id: String,
    /// Venue A object id.
    pub venue_id: String,
    /// Flash-liquidity venue; `None` disables supplemental draws.
    pub supplemental_venue_id: Option<String>,
    /// Address whose gas balance is tracked; `None` disables the gas check.
    pub agent_address: Option<String>,
    /// When set, proofs are sealed before storage.
    pub seal_secret: Option<String>,
    pub retention_epochs: u32,
    pub tick_interval: Duration,
    pub shift: ShiftCfg,
}

impl fmt::Debug for SentinelSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentinelSettings")
            .field("pool_id", &self.pool_id)
            .field("venue_id", &self.venue_id)
            .field("supplemental_venue_id", &self.supplemental_venue_id)
            .field("agent_address", &self.agent_address)
            .field("seal_secret", &self.seal_secret.as_ref().map(|_| "<redacted>"))
            .field("retention_epochs", &self.retention_epochs)
            .field("tick_interval", &self.tick_interval)
            .field("shift", &self.shift)
            .finish()
    }
}

impl SentinelSettings {
    /// Settings with default venues and thresholds for `pool_id`.
    pub fn new(pool_id: impl Into<String>) -> Self {
        Self {
            pool_id: pool_id.into(),
            venue_id: DEFAULT_VENUE_ID.to_string(),
            supplemental_venue_id: Some(DEFAULT_SUPPLEMENTAL_VENUE_ID.to_string()),
            agent_address: None,
            seal_secret: None,
            retention_epochs: DEFAULT_RETENTION_EPOCHS,
            tick_interval: DEFAULT_TICK_INTERVAL,
            shift: ShiftCfg::default(),
        }
    }

    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let pool_id = get(ENV_POOL_ID).ok_or(SettingsError::Missing(ENV_POOL_ID))?;
        let mut s = Self::new(pool_id);

        if let Some(v) = get(ENV_VENUE_ID) {
            s.venue_id = v;
        }
        if let Some(v) = get(ENV_SUPPLEMENTAL_VENUE_ID) {
            s.supplemental_venue_id = Some(v);
        }
        s.supplemental_venue_id = s.supplemental_venue_id.filter(|id| !is_placeholder_id(id));
        s.agent_address = get(ENV_AGENT_ADDRESS);
        s.seal_secret = get(ENV_SEAL_SECRET);

        let d = ShiftCfg::default();
        s.shift = ShiftCfg {
            yield_threshold_bps: parse_or(&get, ENV_YIELD_THRESHOLD_BPS, d.yield_threshold_bps)?,
            max_shift_pct: parse_or(&get, ENV_MAX_SHIFT_PCT, d.max_shift_pct)?,
            cooldown_secs: parse_or(&get, ENV_COOLDOWN_SECONDS, d.cooldown_secs)?,
            gas_min_balance: parse_or(&get, ENV_GAS_MIN_BALANCE, d.gas_min_balance)?,
            gas_refuel_amount: parse_or(&get, ENV_GAS_REFUEL_AMOUNT, d.gas_refuel_amount)?,
        };
        s.shift.validate()?;

        Ok(s)
    }

    pub fn supplemental_venue(&self) -> Option<&str> {
        self.supplemental_venue_id.as_deref()
    }

    pub fn seal_secret(&self) -> Option<&[u8]> {
        self.seal_secret.as_deref().map(str::as_bytes)
    }
}

/// Unconfigured object ids are deployed as zero-padded placeholders.
fn is_placeholder_id(id: &str) -> bool {
    id.ends_with("00000000")
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, SettingsError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| SettingsError::Invalid { key, value: raw }),
    }
}
