//! Desk: the single owner and writer of AppState
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDateTime;
use cra_core::{AppContent, AppState, Change, Clock, SystemClock, TourState};
use cra_policy::{resolve_systems, score, RiskAssessment};
use cra_store::{next_id, FileSlot, LoadOutcome, Slot, StateStore};
use serde::Serialize;
use tracing::info;

use crate::draft::ChangeDraft;
use crate::error::DeskError;
use crate::tour::{Tour, TourStep};

/// Label used when none of a change's systems resolve
pub const NO_SYSTEMS_LABEL: &str = "No systems";

/// Rows shown in the dashboard risk queue
pub const DASHBOARD_QUEUE_LEN: usize = 10;

/// A change paired with its freshly computed risk
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntry<'a> {
    /// The stored change
    pub change: &'a Change,
    /// Its risk at the time the queue was built
    pub risk: RiskAssessment,
}

/// Owns the content, the store and the in-memory state.
///
/// Every mutation builds the next state, persists it, and only then swaps
/// it in, so a failed write leaves memory and slot in agreement.
pub struct Desk<S: Slot> {
    content: AppContent,
    store: StateStore<S>,
    clock: Arc<dyn Clock>,
    tour: Tour,
    state: AppState,
    last_load: LoadOutcome,
}

impl Desk<FileSlot> {
    /// Open the default slot file under `dir` using the system clock
    pub fn open_in_dir(content: AppContent, dir: impl AsRef<Path>) -> Result<Self, DeskError> {
        Self::open(content, FileSlot::in_dir(dir), Arc::new(SystemClock))
    }
}

impl<S: Slot> Desk<S> {
    /// Validate `content`, then load (or seed) the state held in `slot`
    pub fn open(content: AppContent, slot: S, clock: Arc<dyn Clock>) -> Result<Self, DeskError> {
        content.validate()?;
        let mut store = StateStore::new(slot, content.demo_data.clone(), Arc::clone(&clock));
        let loaded = store.load()?;
        let tour = Tour::from_nav(&content.nav);

        info!(
            "Opened desk for {}: {} changes ({:?})",
            content.brand.name,
            loaded.state.changes.len(),
            loaded.outcome
        );

        Ok(Self {
            content,
            store,
            clock,
            tour,
            state: loaded.state,
            last_load: loaded.outcome,
        })
    }

    /// The current in-memory state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The injected content configuration
    pub fn content(&self) -> &AppContent {
        &self.content
    }

    /// The underlying store and its slot
    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    /// How the current state was obtained by the last load or reset
    pub fn last_load(&self) -> &LoadOutcome {
        &self.last_load
    }

    /// Current time from the injected clock
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    // === Scoring ===

    /// Score a change against the current systems and the injected rules
    pub fn assess(&self, change: &Change) -> RiskAssessment {
        score(change, &self.state.systems, &self.content.risk_rules, self.clock.now())
    }

    /// Changes ordered by risk, highest first, at most `limit` of them.
    /// Ties keep their stored order.
    pub fn risk_queue(&self, limit: usize) -> Vec<QueueEntry<'_>> {
        let now = self.clock.now();
        let mut queue: Vec<QueueEntry<'_>> = self
            .state
            .changes
            .iter()
            .map(|change| QueueEntry {
                change,
                risk: score(change, &self.state.systems, &self.content.risk_rules, now),
            })
            .collect();
        queue.sort_by(|a, b| b.risk.total.cmp(&a.risk.total));
        queue.truncate(limit);
        queue
    }

    /// Comma-joined names of the resolvable systems
    pub fn systems_label(&self, ids: &[u32]) -> String {
        let names: Vec<&str> = resolve_systems(ids, &self.state.systems)
            .map(|s| s.name.as_str())
            .collect();
        if names.is_empty() {
            NO_SYSTEMS_LABEL.to_string()
        } else {
            names.join(", ")
        }
    }

    // === Mutations ===

    /// Validate a draft, assign the next id, and store it at the front
    pub fn create_change(&mut self, draft: ChangeDraft) -> Result<Change, DeskError> {
        let id = next_id(&self.state.changes)?;
        let change = draft.into_change(id, &self.content)?;

        let mut next = self.state.clone();
        next.changes.insert(0, change.clone());
        self.commit(next)?;

        info!(
            "Created change {} \"{}\" ({})",
            change.id,
            change.title,
            self.assess(&change).summary()
        );
        Ok(change)
    }

    /// Re-read the slot, replacing the in-memory state
    pub fn load_state(&mut self) -> Result<&LoadOutcome, DeskError> {
        let loaded = self.store.load()?;
        self.state = loaded.state;
        self.last_load = loaded.outcome;
        Ok(&self.last_load)
    }

    /// Write the in-memory state to the slot
    pub fn save_state(&mut self) -> Result<(), DeskError> {
        self.store.save(&self.state)?;
        Ok(())
    }

    /// Throw away everything and reseed from the demo template
    pub fn reset_state(&mut self) -> Result<&AppState, DeskError> {
        self.state = self.store.reset()?;
        self.last_load = LoadOutcome::FirstRun;
        Ok(&self.state)
    }

    /// Pretty-printed JSON of the whole state
    pub fn export_state_json(&self) -> Result<String, DeskError> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }

    // === Tour ===

    /// The tour built from the navigation entries
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// The step being shown, if the tour is running
    pub fn tour_step(&self) -> Option<&TourStep> {
        self.tour.current(&self.state.demo)
    }

    /// Start the tour from the first step and persist its position
    pub fn start_tour(&mut self) -> Result<Option<TourStep>, DeskError> {
        self.move_tour(|tour, demo| tour.start(demo).cloned())
    }

    /// Next step; `None` once the tour has ended
    pub fn advance_tour(&mut self) -> Result<Option<TourStep>, DeskError> {
        self.move_tour(|tour, demo| tour.advance(demo).cloned())
    }

    /// Previous step, staying on the first
    pub fn back_tour(&mut self) -> Result<Option<TourStep>, DeskError> {
        self.move_tour(|tour, demo| tour.back(demo).cloned())
    }

    /// End the tour and persist the reset position
    pub fn stop_tour(&mut self) -> Result<(), DeskError> {
        self.move_tour(|_, demo| {
            Tour::stop(demo);
            None
        })?;
        Ok(())
    }

    fn move_tour<F>(&mut self, step: F) -> Result<Option<TourStep>, DeskError>
    where
        F: FnOnce(&Tour, &mut TourState) -> Option<TourStep>,
    {
        let mut next = self.state.clone();
        let shown = step(&self.tour, &mut next.demo);
        if next.demo != self.state.demo {
            self.commit(next)?;
        }
        Ok(shown)
    }

    fn commit(&mut self, next: AppState) -> Result<(), DeskError> {
        self.store.save(&next)?;
        self.state = next;
        Ok(())
    }
}
