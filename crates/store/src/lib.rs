//! `carebase-store` — storage contracts and the in-memory reference store.
//!
//! The persistent storage engine is an external collaborator: this crate
//! defines what it must support (point lookup by unique key, associative
//! hydration of the account graph, email uniqueness, transactional
//! multi-row commit) as traits, ships an in-memory implementation for tests
//! and development, and hosts the soft-delete coordinator that owns the
//! cascade rules.

pub mod coordinator;
pub mod directory;
pub mod error;
pub mod memory;
pub mod records;
pub mod seed;

pub use coordinator::SoftDeleteCoordinator;
pub use directory::{AccountGraph, DirectoryStore, ProfileRow, Tombstone};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use records::{AppointmentScope, RecordScope, RecordsStore};
pub use seed::seed_catalog;

/// Everything the service layer needs from a backing store.
pub trait Store: DirectoryStore + RecordsStore {}

impl<T: DirectoryStore + RecordsStore> Store for T {}
