use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{CanteenError, CanteenResult};
use crate::models::reservation::Reservation;
use crate::models::slot::{self, TimeSlot};
use crate::models::table::Table;

/// Where the user is in the table-reservation flow. The machine is
/// re-enterable indefinitely; there is no terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPhase {
    NoWindowChosen,
    WindowConfirmed,
    TableChosen,
    ReservationCommitted,
}

/// The in-progress table/time-slot choice for one browsing session.
///
/// All transitions here are synchronous and side-effect free; the
/// surrounding session decides when to re-fetch availability and when to
/// mirror the commitment to durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub reservation_date: NaiveDate,
    pub party_size: u32,
    pub pending_slot_id: Option<String>,
    pub confirmed_slot: Option<TimeSlot>,
    pub selected_table_id: Option<i64>,
    pub selected_reservation: Option<Reservation>,
}

impl SelectionState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            reservation_date: today,
            party_size: 1,
            pending_slot_id: None,
            confirmed_slot: None,
            selected_table_id: None,
            selected_reservation: None,
        }
    }

    pub fn phase(&self) -> SelectionPhase {
        if self.selected_reservation.is_some() {
            SelectionPhase::ReservationCommitted
        } else if self.selected_table_id.is_some() {
            SelectionPhase::TableChosen
        } else if self.confirmed_slot.is_some() {
            SelectionPhase::WindowConfirmed
        } else {
            SelectionPhase::NoWindowChosen
        }
    }

    /// Changing the date invalidates every downstream choice: the slot
    /// must be re-confirmed and the table re-picked against the new day.
    pub fn set_reservation_date(&mut self, date: NaiveDate) {
        self.reservation_date = date;
        self.pending_slot_id = None;
        self.confirmed_slot = None;
        self.selected_table_id = None;
        self.selected_reservation = None;
    }

    pub fn set_party_size(&mut self, party_size: u32) -> CanteenResult<()> {
        if party_size == 0 {
            return Err(CanteenError::Validation(
                "Party size must be at least 1".to_string(),
            ));
        }
        self.party_size = party_size;
        Ok(())
    }

    pub fn set_pending_slot(&mut self, slot_id: impl Into<String>) {
        self.pending_slot_id = Some(slot_id.into());
    }

    /// Lock in the pending slot as the confirmed browsing window.
    /// Clears any previously chosen table or committed reservation; the
    /// table list must be re-fetched scoped to the new window.
    pub fn confirm_slot(&mut self) -> CanteenResult<TimeSlot> {
        let slot_id = self.pending_slot_id.as_deref().ok_or_else(|| {
            CanteenError::Validation("Select a time slot before confirming".to_string())
        })?;
        let slot = slot::find_slot(slot_id).ok_or_else(|| {
            CanteenError::Validation(format!("Unknown time slot: {slot_id}"))
        })?;
        self.confirmed_slot = Some(slot.clone());
        self.selected_table_id = None;
        self.selected_reservation = None;
        Ok(slot.clone())
    }

    /// Pick a table for the confirmed window. Rejected without state
    /// change when no window is confirmed or the table is not available.
    pub fn select_table(&mut self, table: &Table) -> CanteenResult<()> {
        if self.confirmed_slot.is_none() {
            return Err(CanteenError::Validation(
                "Confirm a time window before choosing a table".to_string(),
            ));
        }
        if !table.is_selectable() {
            return Err(CanteenError::Validation(format!(
                "Table {} is not available for this window",
                table.number
            )));
        }
        self.selected_table_id = Some(table.id);
        // Any earlier commitment belonged to the previous pick.
        self.selected_reservation = None;
        Ok(())
    }

    /// Commit the chosen table and window as a pending reservation.
    pub fn prepare_reservation(&mut self) -> CanteenResult<Reservation> {
        let slot = self.confirmed_slot.as_ref().ok_or_else(|| {
            CanteenError::Validation("Confirm a time window first".to_string())
        })?;
        let table_id = self.selected_table_id.ok_or_else(|| {
            CanteenError::Validation("Choose a table first".to_string())
        })?;
        let reservation =
            Reservation::pending(table_id, self.reservation_date, slot, self.party_size)?;
        self.selected_reservation = Some(reservation.clone());
        Ok(reservation)
    }

    /// Drop the commitment while keeping the confirmed window and table,
    /// so the user can immediately recommit.
    pub fn clear_reservation(&mut self) {
        self.selected_reservation = None;
    }
}
