use chrono::NaiveDate;
use tracing::{debug, info};

use canteen_api::clients::{BackendApi, TableWindow};
use canteen_core::availability::{resolve_slot_statuses, SlotAvailability};
use canteen_core::errors::{CanteenError, CanteenResult};
use canteen_core::models::order::{CreateOrderRequest, CreateOrderResponse, OrderItem};
use canteen_core::models::reservation::Reservation;
use canteen_core::models::selection::{SelectionPhase, SelectionState};
use canteen_core::models::slot::{self, TimeSlot};
use canteen_core::models::table::Table;
use canteen_store::SnapshotStore;

use crate::mirror::SelectionMirror;

/// The reservation flow for one browsing session.
///
/// Owns the selection state, the most recent availability data, and the
/// persistence mirror. Every user-triggered transition comes through
/// here: failures are converted into a retained user-facing message and
/// the state machine stays on its last stable state, ready for a retry.
///
/// Fetches follow latest-wins sequencing: each fetch family (tables,
/// slot statuses) carries a monotonically increasing sequence number,
/// and a completion whose number is no longer current is discarded. The
/// `begin_*`/`apply_*` pairs expose that protocol to event-loop callers
/// that drive overlapping fetches; the `refresh_*` methods are the
/// inline convenience path.
pub struct SelectionSession<A: BackendApi, S: SnapshotStore> {
    api: A,
    mirror: SelectionMirror<S>,
    customer_id: Option<i64>,
    state: SelectionState,
    selected_table: Option<Table>,
    tables: Vec<Table>,
    slot_statuses: Vec<SlotAvailability>,
    last_error: Option<String>,
    tables_seq: u64,
    slots_seq: u64,
}

impl<A: BackendApi, S: SnapshotStore> SelectionSession<A, S> {
    /// Mount the session: defaults plus whatever commitment the durable
    /// snapshot still holds from a previous page load.
    pub fn new(api: A, store: S, today: NaiveDate, customer_id: Option<i64>) -> Self {
        let mut mirror = SelectionMirror::new(store);
        let restored = mirror.load();

        let mut state = SelectionState::new(today);
        if let Some(table) = &restored.table {
            state.selected_table_id = Some(table.id);
        }
        state.selected_reservation = restored.reservation;
        if state.selected_reservation.is_some() {
            info!("restored a committed reservation from the local snapshot");
        }

        Self {
            api,
            mirror,
            customer_id,
            state,
            selected_table: restored.table,
            tables: Vec::new(),
            slot_statuses: Vec::new(),
            last_error: None,
            tables_seq: 0,
            slots_seq: 0,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn phase(&self) -> SelectionPhase {
        self.state.phase()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Output of the slot-status resolver for the table last probed via
    /// [`Self::refresh_slot_statuses`], in operating-day order.
    pub fn slot_statuses(&self) -> &[SlotAvailability] {
        &self.slot_statuses
    }

    pub fn selected_table(&self) -> Option<&Table> {
        self.selected_table.as_ref()
    }

    pub fn selected_reservation(&self) -> Option<&Reservation> {
        self.state.selected_reservation.as_ref()
    }

    /// Most recent user-facing failure message, kept until the next
    /// transition attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn capture(&mut self, err: CanteenError) -> CanteenError {
        self.last_error = Some(err.to_string());
        err
    }

    fn mirror_table(&mut self, table: Option<&Table>) -> CanteenResult<()> {
        match self.mirror.save_table(table) {
            Ok(()) => Ok(()),
            Err(err) => {
                let err = CanteenError::Storage(err);
                Err(self.capture(err))
            }
        }
    }

    fn mirror_reservation(&mut self, reservation: Option<&Reservation>) -> CanteenResult<()> {
        match self.mirror.save_reservation(reservation) {
            Ok(()) => Ok(()),
            Err(err) => {
                let err = CanteenError::Storage(err);
                Err(self.capture(err))
            }
        }
    }

    /// Expose the mirror for inspection in tests.
    pub fn mirror(&self) -> &SelectionMirror<S> {
        &self.mirror
    }

    fn current_window(&self) -> Option<TableWindow> {
        self.state.confirmed_slot.as_ref().map(|slot| TableWindow {
            date: self.state.reservation_date,
            start_time: slot.start,
            end_time: slot.end,
        })
    }

    /// Switch the flow to another calendar date. Every downstream choice
    /// is invalidated, in-flight fetches for the old date are obsoleted,
    /// and an unscoped table fetch replaces the list.
    pub async fn set_reservation_date(&mut self, date: NaiveDate) -> CanteenResult<()> {
        self.last_error = None;
        self.state.set_reservation_date(date);
        self.selected_table = None;
        self.slot_statuses.clear();
        self.slots_seq += 1;
        // The mirrored commitment is gone with the date; a reload must
        // not resurrect an intent for another day.
        self.mirror_table(None)?;
        self.mirror_reservation(None)?;
        debug!(%date, "reservation date changed, selection reset");
        self.refresh_tables().await
    }

    pub fn set_party_size(&mut self, party_size: u32) -> CanteenResult<()> {
        self.last_error = None;
        self.state
            .set_party_size(party_size)
            .map_err(|err| self.capture(err))
    }

    pub fn set_pending_slot(&mut self, slot_id: impl Into<String>) {
        self.state.set_pending_slot(slot_id);
    }

    /// Lock in the pending slot and re-scope the table list to it.
    pub async fn confirm_window(&mut self) -> CanteenResult<()> {
        self.last_error = None;
        let slot = match self.state.confirm_slot() {
            Ok(slot) => slot,
            Err(err) => return Err(self.capture(err)),
        };
        debug!(slot = %slot.id, "window confirmed, re-scoping table list");
        self.selected_table = None;
        self.mirror_table(None)?;
        self.mirror_reservation(None)?;
        self.refresh_tables().await
    }

    /// Start a table fetch: bumps the sequence and hands back the tag
    /// plus the window the request should be scoped to.
    pub fn begin_tables_fetch(&mut self) -> (u64, Option<TableWindow>) {
        self.tables_seq += 1;
        (self.tables_seq, self.current_window())
    }

    /// Apply a completed table fetch. A stale tag is discarded silently;
    /// a failure empties the list rather than leaving stale rows, and
    /// the message is retained for display.
    pub fn apply_tables_fetch(
        &mut self,
        seq: u64,
        result: CanteenResult<Vec<Table>>,
    ) -> CanteenResult<()> {
        if seq != self.tables_seq {
            debug!(seq, current = self.tables_seq, "discarding stale table fetch");
            return Ok(());
        }
        match result {
            Ok(tables) => {
                debug!(count = tables.len(), "table list updated");
                self.tables = tables;
                Ok(())
            }
            Err(err) => {
                self.tables.clear();
                Err(self.capture(err))
            }
        }
    }

    pub async fn refresh_tables(&mut self) -> CanteenResult<()> {
        let (seq, window) = self.begin_tables_fetch();
        let result = self.api.list_tables(window).await;
        self.apply_tables_fetch(seq, result)
    }

    /// Start a slot-status fetch for one table on the current date.
    pub fn begin_slot_status_fetch(&mut self, table_id: i64) -> (u64, i64, NaiveDate) {
        self.slots_seq += 1;
        (self.slots_seq, table_id, self.state.reservation_date)
    }

    /// Apply a completed reservation-list fetch by running the resolver
    /// over the fixed slot sequence.
    pub fn apply_slot_status_fetch(
        &mut self,
        seq: u64,
        date: NaiveDate,
        result: CanteenResult<Vec<Reservation>>,
    ) -> CanteenResult<()> {
        if seq != self.slots_seq {
            debug!(seq, current = self.slots_seq, "discarding stale slot-status fetch");
            return Ok(());
        }
        match result {
            Ok(reservations) => {
                self.slot_statuses = resolve_slot_statuses(
                    slot::day_slots(),
                    date,
                    &reservations,
                    self.customer_id,
                );
                Ok(())
            }
            Err(err) => {
                self.slot_statuses.clear();
                Err(self.capture(err))
            }
        }
    }

    pub async fn refresh_slot_statuses(&mut self, table_id: i64) -> CanteenResult<()> {
        self.last_error = None;
        let (seq, table_id, date) = self.begin_slot_status_fetch(table_id);
        let result = self.api.list_reservations(table_id, date).await;
        self.apply_slot_status_fetch(seq, date, result)
    }

    /// Pick a table from the current list. Only `available` tables are
    /// accepted; anything else is rejected with a message and the state
    /// stays put.
    pub fn select_table(&mut self, table_id: i64) -> CanteenResult<()> {
        self.last_error = None;
        let Some(table) = self.tables.iter().find(|t| t.id == table_id).cloned() else {
            let err = CanteenError::Validation(format!(
                "Table {table_id} is not in the current list"
            ));
            return Err(self.capture(err));
        };
        if let Err(err) = self.state.select_table(&table) {
            return Err(self.capture(err));
        }
        self.selected_table = Some(table.clone());
        self.mirror_table(Some(&table))?;
        // Any earlier commitment belonged to the previous pick.
        self.mirror_reservation(None)?;
        Ok(())
    }

    /// Commit the chosen table: builds the pending reservation from the
    /// confirmed window and marks the table as the session's active
    /// table for downstream ordering. No network call is made.
    pub fn confirm_table(&mut self) -> CanteenResult<Reservation> {
        self.last_error = None;
        let reservation = match self.state.prepare_reservation() {
            Ok(reservation) => reservation,
            Err(err) => return Err(self.capture(err)),
        };
        info!(
            table_id = reservation.table_id,
            start = %reservation.start_time,
            "reservation committed locally"
        );
        self.mirror_reservation(Some(&reservation))?;
        Ok(reservation)
    }

    /// Produce and commit a pending reservation directly from the given
    /// coordinates, bypassing the interactive flow. No network call is
    /// made.
    pub fn prepare_reservation(
        &mut self,
        table_id: i64,
        slot: &TimeSlot,
        date: NaiveDate,
        party_size: u32,
    ) -> CanteenResult<Reservation> {
        self.last_error = None;
        let reservation = match Reservation::pending(table_id, date, slot, party_size) {
            Ok(reservation) => reservation,
            Err(err) => return Err(self.capture(err)),
        };
        self.state.reservation_date = date;
        self.state.party_size = party_size;
        self.state.pending_slot_id = Some(slot.id.clone());
        self.state.confirmed_slot = Some(slot.clone());
        self.state.selected_table_id = Some(table_id);
        self.state.selected_reservation = Some(reservation.clone());
        if let Some(table) = self.tables.iter().find(|t| t.id == table_id).cloned() {
            self.selected_table = Some(table.clone());
            self.mirror_table(Some(&table))?;
        }
        self.mirror_reservation(Some(&reservation))?;
        Ok(reservation)
    }

    /// Drop the commitment and remove its durable entry. The confirmed
    /// window and chosen table survive so the user can recommit at once.
    pub fn clear_reservation(&mut self) -> CanteenResult<()> {
        self.last_error = None;
        self.state.clear_reservation();
        self.mirror_reservation(None)
    }

    /// Submit the pending reservation to the backend. On success the
    /// local record is replaced by the server's (now carrying an id); a
    /// conflict keeps the local intent so the user can adjust and retry.
    pub async fn persist_reservation(&mut self) -> CanteenResult<Reservation> {
        self.last_error = None;
        let pending = match self.state.selected_reservation.clone() {
            Some(reservation) if reservation.is_pending() => reservation,
            Some(_) => {
                let err =
                    CanteenError::Validation("The reservation is already confirmed".to_string());
                return Err(self.capture(err));
            }
            None => {
                let err = CanteenError::Validation("No reservation to submit".to_string());
                return Err(self.capture(err));
            }
        };
        match self.api.create_reservation(pending).await {
            Ok(saved) => {
                self.state.selected_reservation = Some(saved.clone());
                self.mirror_reservation(Some(&saved))?;
                Ok(saved)
            }
            Err(err) => Err(self.capture(err)),
        }
    }

    /// Cancel the held reservation: deletes it server-side when it has
    /// been persisted, then clears the local commitment either way.
    pub async fn release_reservation(&mut self) -> CanteenResult<()> {
        self.last_error = None;
        let Some(reservation) = self.state.selected_reservation.clone() else {
            return Ok(());
        };
        if let Some(id) = reservation.id {
            if let Err(err) = self.api.delete_reservation(id).await {
                return Err(self.capture(err));
            }
            info!(reservation_id = id, "held reservation released");
        }
        self.state.clear_reservation();
        self.mirror_reservation(None)
    }

    /// Send the cart as an order for the session's active table.
    pub async fn place_order(
        &mut self,
        items: Vec<OrderItem>,
        notes: Option<String>,
    ) -> CanteenResult<CreateOrderResponse> {
        self.last_error = None;
        let Some(table) = self.selected_table.clone() else {
            let err =
                CanteenError::Validation("Choose a table before placing an order".to_string());
            return Err(self.capture(err));
        };
        if items.is_empty() {
            let err = CanteenError::Validation("The order has no items".to_string());
            return Err(self.capture(err));
        }
        let request = CreateOrderRequest {
            table_id: table.id,
            notes,
            items,
        };
        match self.api.create_order(request).await {
            Ok(confirmation) => Ok(confirmation),
            Err(err) => Err(self.capture(err)),
        }
    }
}
