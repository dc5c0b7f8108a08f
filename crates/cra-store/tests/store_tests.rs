//! Integration tests for the state store over a real file slot.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use cra_core::{AppContent, AppState, ChangeStatus, FixedClock, LocalTimestamp};
use cra_store::{next_id, FileSlot, LoadOutcome, Slot, StateStore};
use tempfile::TempDir;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap()
}

fn file_store(dir: &TempDir) -> StateStore<FileSlot> {
    StateStore::new(
        FileSlot::in_dir(dir.path()),
        AppContent::reference().demo_data,
        Arc::new(FixedClock::new(now())),
    )
}

#[test]
fn test_save_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);

    let original = store.load().unwrap().state;
    store.save(&original).unwrap();
    let reloaded = store.load().unwrap();

    assert_eq!(reloaded.outcome, LoadOutcome::Persisted);
    assert_eq!(reloaded.state, original);
}

#[test]
fn test_round_trip_survives_new_store_instance() {
    let dir = TempDir::new().unwrap();
    let mut state = file_store(&dir).load().unwrap().state;
    state.changes[0].status = ChangeStatus::Approved;
    state.demo.active = true;
    state.demo.step = 2;
    file_store(&dir).save(&state).unwrap();

    let reopened = file_store(&dir).load().unwrap();
    assert_eq!(reopened.outcome, LoadOutcome::Persisted);
    assert_eq!(reopened.state, state);
}

#[test]
fn test_malformed_timestamp_survives_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);
    let mut state = store.load().unwrap().state;
    state.changes[0].planned_start = LocalTimestamp::new("whenever");

    store.save(&state).unwrap();
    let reloaded = store.load().unwrap().state;

    assert_eq!(reloaded.changes[0].planned_start.as_str(), "whenever");
}

#[test]
fn test_consecutive_resets_are_equal_and_independent() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);

    let mut first = store.reset().unwrap();
    let second = store.reset().unwrap();
    assert_eq!(first, second);

    first.changes.clear();
    first.systems[0].tier = 1;
    assert_ne!(first, second);

    let third = store.reset().unwrap();
    assert_eq!(third, second);
    assert_eq!(store.template(), &AppContent::reference().demo_data);
}

#[test]
fn test_corrupt_file_is_reported_and_replaced() {
    let dir = TempDir::new().unwrap();
    let mut slot = FileSlot::in_dir(dir.path());
    slot.write("[1, 2, 3").unwrap();

    let mut store = file_store(&dir);
    let loaded = store.load().unwrap();

    match &loaded.outcome {
        LoadOutcome::Reseeded(err) => assert!(!err.reason.is_empty()),
        other => panic!("expected reseed, got {:?}", other),
    }
    let on_disk = std::fs::read_to_string(slot.path()).unwrap();
    let parsed: AppState = serde_json::from_str(&on_disk).unwrap();
    assert_eq!(parsed, loaded.state);
}

#[test]
fn test_wrong_shape_counts_as_corrupt() {
    let dir = TempDir::new().unwrap();
    let mut slot = FileSlot::in_dir(dir.path());
    slot.write(r#"{"changes": "not a list"}"#).unwrap();

    let loaded = file_store(&dir).load().unwrap();
    assert!(matches!(loaded.outcome, LoadOutcome::Reseeded(_)));
}

#[test]
fn test_legacy_browser_json_loads() {
    let dir = TempDir::new().unwrap();
    let mut slot = FileSlot::in_dir(dir.path());
    slot.write(
        r#"{
            "systems": [{ "id": 1, "name": "Core DNS", "tier": 3, "desc": "DNS" }],
            "incidents": [],
            "changes": [{
                "id": 9,
                "title": "Legacy",
                "changeType": "dns",
                "requester": "J Roque",
                "plannedStart": "2026-10-18T10:00",
                "plannedEnd": "2026-10-18T11:00",
                "customerImpact": "high",
                "status": "submitted",
                "systems": [1],
                "rollbackPlan": "",
                "testPlan": "",
                "steps": ""
            }]
        }"#,
    )
    .unwrap();

    let loaded = file_store(&dir).load().unwrap();
    assert_eq!(loaded.outcome, LoadOutcome::Persisted);
    assert_eq!(loaded.state.systems[0].description, "DNS");
    assert_eq!(next_id(&loaded.state.changes).unwrap(), 10);
}

#[test]
fn test_seeded_ids_continue_after_seed_max() {
    let dir = TempDir::new().unwrap();
    let state = file_store(&dir).load().unwrap().state;
    assert_eq!(next_id(&state.changes).unwrap(), 203);
}

#[test]
fn test_unknown_status_survives_load() {
    let dir = TempDir::new().unwrap();
    let mut slot = FileSlot::in_dir(dir.path());
    slot.write(
        r#"{
            "systems": [],
            "incidents": [],
            "changes": [
                { "id": 7, "title": "Dropped", "status": "cancelled" },
                { "id": 8, "title": "Kept", "status": "submitted" }
            ]
        }"#,
    )
    .unwrap();

    let mut store = file_store(&dir);
    let loaded = store.load().unwrap();
    assert_eq!(loaded.outcome, LoadOutcome::Persisted);
    assert_eq!(
        loaded.state.changes.iter().map(|c| c.id).collect::<Vec<_>>(),
        [7, 8]
    );
    assert_eq!(loaded.state.changes[0].status, ChangeStatus::Other("cancelled".to_string()));
    assert_eq!(loaded.state.changes[1].status, ChangeStatus::Submitted);

    store.save(&loaded.state).unwrap();
    let raw = slot.read().unwrap().unwrap();
    assert!(raw.contains(r#""status":"cancelled""#));
}
