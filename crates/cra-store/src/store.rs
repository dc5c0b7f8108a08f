//! StateStore: load, save and reset the persisted AppState
use std::sync::Arc;

use cra_core::{AppState, Clock, DemoData};
use tracing::{info, warn};

use crate::error::{PersistenceReadError, StoreError};
use crate::seed::seed_state;
use crate::slot::Slot;

/// How a loaded state came to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Parsed from the slot
    Persisted,
    /// The slot was empty; a fresh state was seeded
    FirstRun,
    /// The slot held garbage; it was replaced with a fresh state
    Reseeded(PersistenceReadError),
}

impl LoadOutcome {
    pub fn was_seeded(&self) -> bool {
        !matches!(self, LoadOutcome::Persisted)
    }
}

/// Result of [`StateStore::load`]
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub state: AppState,
    pub outcome: LoadOutcome,
}

/// Owns the slot and the seed template.
///
/// Every write replaces the whole serialized state; there are no partial
/// updates.
pub struct StateStore<S: Slot> {
    slot: S,
    template: DemoData,
    clock: Arc<dyn Clock>,
}

impl<S: Slot> StateStore<S> {
    pub fn new(slot: S, template: DemoData, clock: Arc<dyn Clock>) -> Self {
        Self {
            slot,
            template,
            clock,
        }
    }

    /// Read the slot, seeding it when it is empty or unreadable
    pub fn load(&mut self) -> Result<Loaded, StoreError> {
        let outcome = match self.slot.read()? {
            Some(raw) => match serde_json::from_str::<AppState>(&raw) {
                Ok(state) => {
                    return Ok(Loaded {
                        state,
                        outcome: LoadOutcome::Persisted,
                    })
                }
                Err(e) => {
                    let err = PersistenceReadError::from(e);
                    warn!("Discarding persisted state: {}", err);
                    LoadOutcome::Reseeded(err)
                }
            },
            None => {
                info!("No persisted state found, seeding demo data");
                LoadOutcome::FirstRun
            }
        };

        let state = self.seed();
        self.save(&state)?;
        Ok(Loaded { state, outcome })
    }

    /// Serialize the full state and overwrite the slot
    pub fn save(&mut self, state: &AppState) -> Result<(), StoreError> {
        let raw = serde_json::to_string(state)?;
        self.slot.write(&raw)?;
        info!(
            "Saved state: {} changes, {} systems, {} incidents",
            state.changes.len(),
            state.systems.len(),
            state.incidents.len()
        );
        Ok(())
    }

    /// Drop the slot and start over from the template
    pub fn reset(&mut self) -> Result<AppState, StoreError> {
        self.slot.remove()?;
        let state = self.seed();
        self.save(&state)?;
        info!("Reset state to demo data");
        Ok(state)
    }

    pub fn template(&self) -> &DemoData {
        &self.template
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    fn seed(&self) -> AppState {
        seed_state(&self.template, self.clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::MemorySlot;
    use chrono::NaiveDate;
    use cra_core::FixedClock;

    fn store(slot: MemorySlot) -> StateStore<MemorySlot> {
        let now = NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        StateStore::new(slot, DemoData::reference(), Arc::new(FixedClock::new(now)))
    }

    #[test]
    fn test_first_load_seeds_and_persists() {
        let mut store = store(MemorySlot::new());
        let loaded = store.load().unwrap();

        assert_eq!(loaded.outcome, LoadOutcome::FirstRun);
        assert_eq!(loaded.state.changes.len(), 2);
        assert!(store.slot().value().is_some());
    }

    #[test]
    fn test_second_load_reads_slot() {
        let mut store = store(MemorySlot::new());
        let first = store.load().unwrap();
        let second = store.load().unwrap();

        assert_eq!(second.outcome, LoadOutcome::Persisted);
        assert_eq!(second.state, first.state);
    }

    #[test]
    fn test_garbage_is_reported_then_reseeded() {
        let mut store = store(MemorySlot::with_value("{not json"));
        let loaded = store.load().unwrap();

        assert!(matches!(loaded.outcome, LoadOutcome::Reseeded(_)));
        assert!(loaded.outcome.was_seeded());
        assert_eq!(loaded.state.systems.len(), 4);

        let again = store.load().unwrap();
        assert_eq!(again.outcome, LoadOutcome::Persisted);
    }

    #[test]
    fn test_reset_discards_changes() {
        let mut store = store(MemorySlot::new());
        let mut state = store.load().unwrap().state;
        state.changes.clear();
        store.save(&state).unwrap();

        let reset = store.reset().unwrap();
        assert_eq!(reset.changes.len(), 2);
        assert_eq!(store.load().unwrap().state, reset);
    }
}
