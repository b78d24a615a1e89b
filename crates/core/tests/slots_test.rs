use canteen_core::models::slot::{
    day_slots, find_slot, CLOSING_HOUR, OPENING_HOUR, SLOT_HOURS,
};
use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;

#[test]
fn test_day_slots_count() {
    assert_eq!(day_slots().len(), 14);
    assert_eq!(
        day_slots().len() as u32,
        (CLOSING_HOUR - OPENING_HOUR) / SLOT_HOURS
    );
}

#[test]
fn test_day_slots_cover_operating_day_without_gaps() {
    let slots = day_slots();

    let opening = NaiveTime::from_hms_opt(7, 0, 0).unwrap();
    let closing = NaiveTime::from_hms_opt(21, 0, 0).unwrap();
    assert_eq!(slots.first().unwrap().start, opening);
    assert_eq!(slots.last().unwrap().end, closing);

    for slot in slots {
        assert!(slot.start < slot.end, "slot {} is not increasing", slot.id);
    }
    for pair in slots.windows(2) {
        assert!(pair[0].start < pair[1].start, "slots are not ordered");
        assert_eq!(
            pair[0].end, pair[1].start,
            "gap or overlap between {} and {}",
            pair[0].id, pair[1].id
        );
    }
}

#[test]
fn test_slot_ids_and_labels() {
    let slots = day_slots();
    assert_eq!(slots[0].id, "07:00-08:00");
    assert_eq!(slots[0].label, "07:00 - 08:00");
    assert_eq!(slots[5].id, "12:00-13:00");
    assert_eq!(slots[13].id, "20:00-21:00");
}

#[test]
fn test_day_slots_is_memoized() {
    assert!(std::ptr::eq(day_slots(), day_slots()));
}

#[test]
fn test_find_slot_by_id() {
    assert!(find_slot("12:00-13:00").is_some());
    assert!(find_slot("06:00-07:00").is_none());
    assert!(find_slot("").is_none());
}

#[test]
fn test_bounds_on_date() {
    let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let slot = find_slot("12:00-13:00").unwrap();

    let (start, end) = slot.bounds_on(date);
    assert_eq!(start.to_string(), "2024-06-10 12:00:00");
    assert_eq!(end.to_string(), "2024-06-10 13:00:00");
}
