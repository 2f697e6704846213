//! Shared types for the shellstate workspace.
//!
//! # Invariants
//! - A state tree is always a JSON object keyed by feature name.
//! - Feature substates are opaque here; only their owning feature decodes them.

pub mod types;

pub use types::{StateTree, into_state_tree};
