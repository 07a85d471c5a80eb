//! vibeshift_supervisor
//!
//! Outside-world facing orchestration layer for `vibeshift_core`.
//!
//! Responsibilities:
//! - own the `CooldownState` and run the cancellable tick loop
//! - read observations through the `Observations` collaborator
//! - invoke the core decision and refuel logic
//! - encode, seal and store audit proofs; hand actions to an `Executor`
//!
//! Non-goals:
//! - no network clients (collaborators are traits)
//! - no key custody or transaction signing
//! - no decision policy (lives in core)

pub mod adapter;
pub mod error;
pub mod logging;
pub mod proof;
pub mod report;
pub mod runtime;
pub mod settings;
pub mod supervisor;

pub use adapter::{
    Observations,
    VenueCapacity,
    BlobId,
    BlobStore,
    MemoryBlobStore,
    StoreError,
    Executor,
    LogExecutor,
};

pub use error::{SentinelError, SettingsError};
pub use logging::{LogConfig, LogFormat, init_logging};
pub use proof::{ProofRecord, encode_proof, decode_proof, open_proof};
pub use report::{GasReport, StatusReport};
pub use runtime::{CancelToken, Clock, SystemClock};
pub use settings::SentinelSettings;

pub use supervisor::{
    Sentinel,
    SentinelSnapshot,
    TickReport,
    CycleOutcome,
    GasCheck,
};
