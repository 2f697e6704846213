//! State hydration: persists the whole state tree to durable storage, restores
//! it at boot, and re-applies it when feature state is mounted lazily.
//!
//! # Invariants
//! - The router slot is never persisted and never restored.
//! - A hydration-successful action replaces the tree atomically; no feature
//!   reducer observes it.
//! - Persistence starts only after the first hydration outcome.
//! - Nothing here fails outward: a failed hydration means a fresh state.

pub mod action;
pub mod config;
pub mod controller;
pub mod meta_reducer;
pub mod providers;

pub use action::HydrationAction;
pub use config::{ConfigError, HydrationConfig};
pub use controller::{HydrationCache, HydrationController};
pub use meta_reducer::HydrationMetaReducer;
pub use providers::{provide_lazy_state_hydration, provide_state_hydration_feature};
