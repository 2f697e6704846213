//! Persistence: a single serialized snapshot of the state tree in durable
//! key-value storage, and the pure transforms applied on the way in and out.
//!
//! # Invariants
//! - A snapshot never contains the router slot.
//! - Reconciliation always re-attaches the current session's router slot.
//! - Gateway operations never fail outward; storage trouble is logged.

pub mod gateway;
pub mod snapshot;
pub mod storage;

pub use gateway::{PersistenceGateway, StoredRecord};
pub use snapshot::{ReconcileError, Snapshot, merge_over, parse_snapshot, reattach_router, strip};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
