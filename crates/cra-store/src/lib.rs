//! CRA Store: Single-Slot Persistence for AppState
//!
//! The whole application state lives in one slot as JSON. An empty slot is
//! a first run and gets seeded from the demo template; an unparseable slot
//! is reported as [`PersistenceReadError`] and reseeded.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cra_core::{AppContent, SystemClock};
//! use cra_store::{LoadOutcome, MemorySlot, StateStore};
//!
//! let content = AppContent::reference();
//! let mut store = StateStore::new(MemorySlot::new(), content.demo_data, Arc::new(SystemClock));
//!
//! let loaded = store.load().unwrap();
//! assert_eq!(loaded.outcome, LoadOutcome::FirstRun);
//! assert_eq!(loaded.state.systems.len(), 4);
//! ```

pub mod error;
pub mod ids;
pub mod seed;
pub mod slot;
pub mod store;

pub use error::{PersistenceReadError, StoreError};
pub use ids::next_id;
pub use seed::seed_state;
pub use slot::{FileSlot, MemorySlot, Slot};
pub use store::{LoadOutcome, Loaded, StateStore};
