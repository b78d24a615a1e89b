use chrono::{NaiveDate, NaiveDateTime};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use canteen_core::errors::{CanteenError, CanteenResult};
use canteen_core::models::reservation::Reservation;

use crate::clients::{fetch_transport_error, non_empty, write_transport_error, ApiClient};
use crate::normalize::{normalize_reservation, RawReservation};

/// Create payload for the backend; the id is server-assigned and the
/// owner is inferred from the authenticated caller, so neither is sent.
#[derive(Debug, Serialize)]
struct CreateReservationRequest {
    table_id: i64,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    party_size: u32,
}

impl From<&Reservation> for CreateReservationRequest {
    fn from(reservation: &Reservation) -> Self {
        Self {
            table_id: reservation.table_id,
            start_time: reservation.start_time,
            end_time: reservation.end_time,
            party_size: reservation.party_size,
        }
    }
}

impl ApiClient {
    /// List all reservations touching the given calendar date for one table.
    pub async fn fetch_reservations_for_table(
        &self,
        table_id: i64,
        date: NaiveDate,
    ) -> CanteenResult<Vec<Reservation>> {
        let response = self
            .http
            .get(self.url("/api/reservations"))
            .query(&[("table_id", table_id.to_string()), ("date", date.to_string())])
            .send()
            .await
            .map_err(fetch_transport_error)?;

        if !response.status().is_success() {
            let message = non_empty(response.text().await.unwrap_or_default());
            return Err(CanteenError::AvailabilityFetch { message });
        }

        let raw: Vec<RawReservation> = response.json().await.map_err(fetch_transport_error)?;
        let mut reservations = Vec::with_capacity(raw.len());
        for record in raw {
            let normalized = normalize_reservation(record).map_err(|err| {
                CanteenError::AvailabilityFetch {
                    message: Some(err.to_string()),
                }
            })?;
            reservations.push(normalized);
        }
        debug!(table_id, %date, count = reservations.len(), "fetched reservations");
        Ok(reservations)
    }

    /// Persist a pending reservation. The backend re-validates the window
    /// and its conflict answer wins over anything resolved client-side.
    pub async fn submit_reservation(
        &self,
        reservation: &Reservation,
    ) -> CanteenResult<Reservation> {
        let request = CreateReservationRequest::from(reservation);
        let response = self
            .http
            .post(self.url("/api/reservations"))
            .json(&request)
            .send()
            .await
            .map_err(write_transport_error)?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            let text = response.text().await.unwrap_or_default();
            // Surface the server's wording verbatim; the local overlap
            // check was only advisory.
            return Err(CanteenError::ReservationConflict(
                non_empty(text)
                    .unwrap_or_else(|| "The selected window is no longer free".to_string()),
            ));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CanteenError::Internal(
                format!("reservation request failed: {}", text.trim()).into(),
            ));
        }

        let raw: RawReservation = response.json().await.map_err(write_transport_error)?;
        let saved = normalize_reservation(raw)
            .map_err(|err| CanteenError::Internal(err.to_string().into()))?;
        debug!(reservation_id = ?saved.id, table_id = saved.table_id, "reservation persisted");
        Ok(saved)
    }

    /// Cancel a held reservation by id.
    pub async fn cancel_reservation(&self, reservation_id: i64) -> CanteenResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/reservations/{reservation_id}")))
            .send()
            .await
            .map_err(write_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(reservation_id, "reservation already gone on cancel");
            return Ok(());
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CanteenError::Internal(
                format!("cancel request failed: {}", text.trim()).into(),
            ));
        }
        Ok(())
    }
}
