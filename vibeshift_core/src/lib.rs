mod arith;

pub mod snapshot;
pub mod action;
pub mod cfg;
pub mod state;
pub mod decide;
pub mod refuel;
pub mod seal;

pub use snapshot::{LiquidityVenueSnapshot, CapitalPoolSnapshot};
pub use action::{Direction, ReallocationAction, RefuelRequest};
pub use cfg::{ShiftCfg, CfgError};
pub use state::CooldownState;
pub use decide::{CapacitySource, NoSupplement, decide, decide_without_supplement};
pub use refuel::{RefuelAssessment, assess_refuel, skim_amount};
pub use seal::{SealedEnvelope, SealError, SEAL_VERSION, derive_key, policy_label, seal, unseal};
