use thiserror::Error;
use vibeshift_core::{CfgError, SealError};

use crate::adapter::StoreError;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error(transparent)]
    Cfg(#[from] CfgError),
}

#[derive(Debug, Error)]
pub enum SentinelError {
    /// An observation was absent. Inside the loop this is a hold, not a failure.
    #[error("data unavailable: {0}")]
    DataUnavailable(&'static str),
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
    #[error(transparent)]
    Seal(#[from] SealError),
    #[error("proof record JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SentinelError>;
