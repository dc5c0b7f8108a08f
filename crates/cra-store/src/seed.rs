//! Seeding: materialize the demo template into a fresh state
use chrono::NaiveDateTime;
use cra_core::{
    AppState, Change, DemoData, Incident, LocalTimestamp, SeedChange, SeedIncident, TourState,
};

/// Build a new state from the template, resolving relative timestamps
/// against `now`. The result owns all of its data, so the template can be
/// reused across any number of resets.
pub fn seed_state(template: &DemoData, now: NaiveDateTime) -> AppState {
    AppState {
        systems: template.systems.clone(),
        changes: template.changes.iter().map(|c| seed_change(c, now)).collect(),
        incidents: template
            .incidents
            .iter()
            .map(|i| seed_incident(i, now))
            .collect(),
        demo: TourState::default(),
    }
}

fn seed_change(seed: &SeedChange, now: NaiveDateTime) -> Change {
    Change {
        id: seed.id,
        title: seed.title.clone(),
        change_type: seed.change_type.clone(),
        requester: seed.requester.clone(),
        planned_start: LocalTimestamp::from_datetime(seed.planned_start.resolve(now)),
        planned_end: LocalTimestamp::from_datetime(seed.planned_end.resolve(now)),
        customer_impact: seed.customer_impact,
        status: seed.status.clone(),
        systems: seed.systems.clone(),
        rollback_plan: seed.rollback_plan.clone(),
        test_plan: seed.test_plan.clone(),
        steps: seed.steps.clone(),
    }
}

fn seed_incident(seed: &SeedIncident, now: NaiveDateTime) -> Incident {
    Incident {
        id: seed.id,
        title: seed.title.clone(),
        severity: seed.severity,
        started_at: LocalTimestamp::from_datetime(seed.started_at.resolve(now)),
        resolved_at: LocalTimestamp::from_datetime(seed.resolved_at.resolve(now)),
        systems: seed.systems.clone(),
        notes: seed.notes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(9, 15, 30)
            .unwrap()
    }

    #[test]
    fn test_seed_resolves_relative_times() {
        let state = seed_state(&DemoData::reference(), now());

        let vpn = state.change(201).unwrap();
        assert_eq!(vpn.planned_start.as_str(), "2026-10-19T09:15");
        assert_eq!(vpn.planned_end.as_str(), "2026-10-19T10:45");

        let dns = state.change(202).unwrap();
        assert_eq!(dns.planned_start.as_str(), "2026-10-17T15:15");

        let outage = &state.incidents[0];
        assert_eq!(outage.started_at.as_str(), "2026-09-26T09:15");
        assert_eq!(outage.resolved_at.as_str(), "2026-09-26T10:00");
    }

    #[test]
    fn test_seed_is_independent_of_template() {
        let template = DemoData::reference();
        let mut state = seed_state(&template, now());

        state.systems[0].name = "Renamed".to_string();
        state.changes[0].systems.push(4);
        state.changes.clear();

        assert_eq!(template, DemoData::reference());
    }

    #[test]
    fn test_empty_template_seeds_empty_state() {
        let state = seed_state(&DemoData::default(), now());
        assert_eq!(state, AppState::default());
    }
}
