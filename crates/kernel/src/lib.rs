//! State kernel: the authoritative state tree and the action pipeline around it.
//!
//! # Invariants
//! - All state mutations flow through dispatched actions.
//! - Actions are processed strictly in FIFO order; effects never interleave.
//! - Meta-reducers are fixed at boot; features and effects may arrive later.

pub mod action;
pub mod effect;
pub mod error;
pub mod feature;
pub mod providers;
pub mod reducer;
pub mod store;

pub use action::{Action, Embeds};
pub use effect::{Effect, EffectContext};
pub use error::StoreError;
pub use feature::Feature;
pub use providers::Providers;
pub use reducer::{MetaReducer, ReduceFn};
pub use shellstate_common::StateTree;
pub use store::Store;
