use canteen_core::errors::CanteenError;
use canteen_core::models::selection::{SelectionPhase, SelectionState};
use canteen_core::models::table::{Table, TableStatus};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn date(value: &str) -> NaiveDate {
    value.parse().unwrap()
}

fn table(id: i64, number: i32, status: TableStatus) -> Table {
    Table {
        id,
        number,
        location: Some("main hall".to_string()),
        capacity: 6,
        status,
    }
}

/// Drive a fresh state into the requested phase.
fn state_in_phase(phase: SelectionPhase) -> SelectionState {
    let mut state = SelectionState::new(date("2024-06-10"));
    if phase == SelectionPhase::NoWindowChosen {
        return state;
    }
    state.set_pending_slot("12:00-13:00");
    state.confirm_slot().unwrap();
    if phase == SelectionPhase::WindowConfirmed {
        return state;
    }
    state
        .select_table(&table(5, 5, TableStatus::Available))
        .unwrap();
    if phase == SelectionPhase::TableChosen {
        return state;
    }
    state.prepare_reservation().unwrap();
    state
}

#[test]
fn test_new_state_defaults() {
    let state = SelectionState::new(date("2024-06-10"));

    assert_eq!(state.reservation_date, date("2024-06-10"));
    assert_eq!(state.party_size, 1);
    assert_eq!(state.phase(), SelectionPhase::NoWindowChosen);
    assert_eq!(state.pending_slot_id, None);
    assert_eq!(state.confirmed_slot, None);
    assert_eq!(state.selected_table_id, None);
    assert_eq!(state.selected_reservation, None);
}

#[test]
fn test_confirm_without_pending_slot_is_rejected() {
    let mut state = SelectionState::new(date("2024-06-10"));

    let err = state.confirm_slot().unwrap_err();
    assert!(matches!(err, CanteenError::Validation(_)));
    assert_eq!(state.phase(), SelectionPhase::NoWindowChosen);
}

#[test]
fn test_confirm_unknown_slot_is_rejected() {
    let mut state = SelectionState::new(date("2024-06-10"));
    state.set_pending_slot("23:00-24:00");

    let err = state.confirm_slot().unwrap_err();
    assert!(matches!(err, CanteenError::Validation(_)));
    assert_eq!(state.confirmed_slot, None);
}

#[test]
fn test_full_flow_produces_pending_reservation() {
    let mut state = SelectionState::new(date("2024-06-01"));
    state.set_reservation_date(date("2024-06-10"));
    state.set_party_size(4).unwrap();
    state.set_pending_slot("12:00-13:00");

    let slot = state.confirm_slot().unwrap();
    assert_eq!(slot.id, "12:00-13:00");
    assert_eq!(state.phase(), SelectionPhase::WindowConfirmed);

    state
        .select_table(&table(5, 5, TableStatus::Available))
        .unwrap();
    assert_eq!(state.phase(), SelectionPhase::TableChosen);

    let reservation = state.prepare_reservation().unwrap();
    assert_eq!(state.phase(), SelectionPhase::ReservationCommitted);
    assert!(reservation.is_pending());
    assert_eq!(
        serde_json::to_value(&reservation).unwrap(),
        json!({
            "id": null,
            "table_id": 5,
            "start_time": "2024-06-10T12:00:00",
            "end_time": "2024-06-10T13:00:00",
            "party_size": 4
        })
    );
}

#[rstest]
#[case(SelectionPhase::NoWindowChosen)]
#[case(SelectionPhase::WindowConfirmed)]
#[case(SelectionPhase::TableChosen)]
#[case(SelectionPhase::ReservationCommitted)]
fn test_date_change_resets_from_any_phase(#[case] phase: SelectionPhase) {
    let mut state = state_in_phase(phase);

    state.set_reservation_date(date("2024-06-11"));

    assert_eq!(state.phase(), SelectionPhase::NoWindowChosen);
    assert_eq!(state.reservation_date, date("2024-06-11"));
    assert_eq!(state.pending_slot_id, None);
    assert_eq!(state.confirmed_slot, None);
    assert_eq!(state.selected_table_id, None);
    assert_eq!(state.selected_reservation, None);
}

#[rstest]
#[case(TableStatus::Occupied)]
#[case(TableStatus::Reserved)]
fn test_unavailable_table_is_rejected(#[case] status: TableStatus) {
    let mut state = state_in_phase(SelectionPhase::WindowConfirmed);
    state
        .select_table(&table(5, 5, TableStatus::Available))
        .unwrap();

    let err = state.select_table(&table(6, 6, status)).unwrap_err();
    assert!(matches!(err, CanteenError::Validation(_)));
    // The earlier pick is untouched
    assert_eq!(state.selected_table_id, Some(5));
}

#[test]
fn test_select_table_requires_confirmed_window() {
    let mut state = SelectionState::new(date("2024-06-10"));

    let err = state
        .select_table(&table(5, 5, TableStatus::Available))
        .unwrap_err();
    assert!(matches!(err, CanteenError::Validation(_)));
    assert_eq!(state.selected_table_id, None);
}

#[test]
fn test_reselecting_a_table_drops_the_commitment() {
    let mut state = state_in_phase(SelectionPhase::ReservationCommitted);

    state
        .select_table(&table(8, 8, TableStatus::Available))
        .unwrap();

    assert_eq!(state.selected_table_id, Some(8));
    assert_eq!(state.selected_reservation, None);
    assert_eq!(state.phase(), SelectionPhase::TableChosen);
}

#[test]
fn test_clear_reservation_keeps_window_and_table() {
    let mut state = state_in_phase(SelectionPhase::ReservationCommitted);

    state.clear_reservation();

    assert_eq!(state.selected_reservation, None);
    assert!(state.confirmed_slot.is_some());
    assert_eq!(state.selected_table_id, Some(5));
    // The user can immediately recommit
    assert!(state.prepare_reservation().is_ok());
}

#[test]
fn test_party_size_must_be_positive() {
    let mut state = SelectionState::new(date("2024-06-10"));

    let err = state.set_party_size(0).unwrap_err();
    assert!(matches!(err, CanteenError::Validation(_)));
    assert_eq!(state.party_size, 1);

    state.set_party_size(12).unwrap();
    assert_eq!(state.party_size, 12);
}

#[test]
fn test_prepare_without_table_is_rejected() {
    let mut state = state_in_phase(SelectionPhase::WindowConfirmed);

    let err = state.prepare_reservation().unwrap_err();
    assert!(matches!(err, CanteenError::Validation(_)));
    assert_eq!(state.selected_reservation, None);
}
