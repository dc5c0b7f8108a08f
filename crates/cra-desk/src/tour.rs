//! Guided tour: a user-paced walk through the views
//!
//! Purely navigational. The tour never touches changes or scores; its only
//! persisted footprint is [`TourState`].

use cra_core::{NavItem, TourState};
use serde::Serialize;

/// One stop on the guided tour
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourStep {
    /// Position in the tour, from 0
    pub index: usize,
    /// Nav id of the view to show
    pub view: String,
    /// Heading shown for the step
    pub title: String,
}

/// Ordered tour steps
#[derive(Debug, Clone, Default)]
pub struct Tour {
    steps: Vec<TourStep>,
}

impl Tour {
    /// One step per navigation entry, in nav order
    pub fn from_nav(nav: &[NavItem]) -> Self {
        Self {
            steps: nav
                .iter()
                .enumerate()
                .map(|(index, item)| TourStep {
                    index,
                    view: item.id.clone(),
                    title: item.label.clone(),
                })
                .collect(),
        }
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps in order
    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }

    /// The step being shown, if the tour is running
    pub fn current(&self, state: &TourState) -> Option<&TourStep> {
        if !state.active {
            return None;
        }
        self.steps.get(state.step)
    }

    /// Begin at the first step; an empty tour stays inactive
    pub fn start(&self, state: &mut TourState) -> Option<&TourStep> {
        state.active = !self.steps.is_empty();
        state.step = 0;
        self.current(state)
    }

    /// Move forward; stepping past the last view ends the tour
    pub fn advance(&self, state: &mut TourState) -> Option<&TourStep> {
        if !state.active {
            return None;
        }
        if state.step + 1 >= self.steps.len() {
            Self::stop(state);
            return None;
        }
        state.step += 1;
        self.current(state)
    }

    /// Move back, staying on the first step
    pub fn back(&self, state: &mut TourState) -> Option<&TourStep> {
        if !state.active {
            return None;
        }
        state.step = state.step.saturating_sub(1);
        self.current(state)
    }

    /// End the tour and rewind it
    pub fn stop(state: &mut TourState) {
        *state = TourState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cra_core::AppContent;

    fn tour() -> Tour {
        Tour::from_nav(&AppContent::reference().nav)
    }

    #[test]
    fn test_walks_all_views_then_stops() {
        let tour = tour();
        let mut state = TourState::default();
        assert!(tour.current(&state).is_none());

        assert_eq!(tour.start(&mut state).unwrap().view, "dashboard");
        let mut seen = vec!["dashboard".to_string()];
        while let Some(step) = tour.advance(&mut state) {
            seen.push(step.view.clone());
        }

        assert_eq!(seen, ["dashboard", "new_change", "changes", "incidents", "about"]);
        assert_eq!(state, TourState::default());
    }

    #[test]
    fn test_back_stays_on_first_step() {
        let tour = tour();
        let mut state = TourState::default();
        tour.start(&mut state);
        tour.advance(&mut state);

        assert_eq!(tour.back(&mut state).unwrap().index, 0);
        assert_eq!(tour.back(&mut state).unwrap().index, 0);
        assert!(state.active);
    }

    #[test]
    fn test_empty_tour_never_activates() {
        let tour = Tour::default();
        let mut state = TourState::default();
        assert!(tour.start(&mut state).is_none());
        assert!(!state.active);
        assert!(tour.advance(&mut state).is_none());
    }

    #[test]
    fn test_out_of_range_step_shows_nothing() {
        let tour = tour();
        let state = TourState { active: true, step: 40 };
        assert!(tour.current(&state).is_none());
    }
}
