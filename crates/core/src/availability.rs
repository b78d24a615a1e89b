//! # Slot-Status Resolver
//!
//! Classifies each slot of the operating day against a table's existing
//! reservations, so the slot picker can render free / booked / held-by-me
//! states before the user commits.
//!
//! For every slot the resolver:
//!
//! 1. Anchors the slot to the target date, producing wall-clock bounds
//! 2. Scans the reservation list for half-open interval overlap
//!    (`slot_start < r.end_time && slot_end > r.start_time` — touching
//!    endpoints do not conflict)
//! 3. Classifies the slot `mine` if a conflicting reservation belongs to
//!    the requesting customer, `booked` on any other conflict, `free`
//!    otherwise, annotating the conflict it found
//!
//! The classification is advisory: by the time a reservation is actually
//! submitted this data may be stale, and the backend's own conflict check
//! is the source of truth.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::reservation::Reservation;
use crate::models::slot::TimeSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Free,
    Booked,
    Mine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub slot: TimeSlot,
    pub status: SlotStatus,
    pub reservation: Option<Reservation>,
}

/// Half-open interval overlap: `[a_start, a_end)` and `[b_start, b_end)`
/// conflict iff they share at least one instant.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Classify every slot of `slots` on `date` against `reservations` for a
/// single table. `customer_id` identifies the requesting user; records
/// without an owner can never classify as `mine`.
pub fn resolve_slot_statuses(
    slots: &[TimeSlot],
    date: NaiveDate,
    reservations: &[Reservation],
    customer_id: Option<i64>,
) -> Vec<SlotAvailability> {
    slots
        .iter()
        .map(|slot| {
            let (slot_start, slot_end) = slot.bounds_on(date);

            let mut first_conflict: Option<&Reservation> = None;
            let mut own_conflict: Option<&Reservation> = None;
            for reservation in reservations {
                if !overlaps(
                    slot_start,
                    slot_end,
                    reservation.start_time,
                    reservation.end_time,
                ) {
                    continue;
                }
                if first_conflict.is_none() {
                    first_conflict = Some(reservation);
                }
                if customer_id.is_some() && reservation.customer_id == customer_id {
                    own_conflict = Some(reservation);
                    break;
                }
            }

            match (own_conflict, first_conflict) {
                (Some(own), _) => SlotAvailability {
                    slot: slot.clone(),
                    status: SlotStatus::Mine,
                    reservation: Some(own.clone()),
                },
                (None, Some(other)) => SlotAvailability {
                    slot: slot.clone(),
                    status: SlotStatus::Booked,
                    reservation: Some(other.clone()),
                },
                (None, None) => SlotAvailability {
                    slot: slot.clone(),
                    status: SlotStatus::Free,
                    reservation: None,
                },
            }
        })
        .collect()
}
