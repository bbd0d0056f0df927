//! Persistence backends for Kaiteki.
//!
//! The [`Store`] trait is the persistence collaborator contract: per-user
//! profile and daily-progress records, keyed by calendar date. Two backends
//! are provided: [`JsonStore`] (JSON files under a data root) and
//! [`MemoryStore`] (HashMap-backed, for tests and ephemeral runs).

mod json_store;
mod memory;
mod trait_;

pub use json_store::JsonStore;
pub use memory::MemoryStore;
pub use trait_::{Result, StorageError, Store};
