use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::debug;

use canteen_core::errors::{CanteenError, CanteenResult};
use canteen_core::models::table::Table;

use crate::clients::{fetch_transport_error, non_empty, ApiClient};
use crate::normalize::{normalize_table, RawTable};

/// Date + slot window a table listing can be scoped to.
///
/// When a window is supplied the server reports each table's status for
/// that specific window; without one the status is the table's global
/// current state and is treated as provisional by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableWindow {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ApiClient {
    /// List tables, optionally scoped to a date + slot window.
    pub async fn fetch_tables(&self, window: Option<&TableWindow>) -> CanteenResult<Vec<Table>> {
        let mut request = self.http.get(self.url("/api/tables"));
        if let Some(window) = window {
            request = request.query(&[
                ("date", window.date.to_string()),
                ("start_time", window.start_time.format("%H:%M").to_string()),
                ("end_time", window.end_time.format("%H:%M").to_string()),
            ]);
        }

        let response = request.send().await.map_err(fetch_transport_error)?;
        if !response.status().is_success() {
            let message = non_empty(response.text().await.unwrap_or_default());
            return Err(CanteenError::AvailabilityFetch { message });
        }

        let raw: Vec<RawTable> = response.json().await.map_err(fetch_transport_error)?;
        debug!(count = raw.len(), scoped = window.is_some(), "fetched table list");
        Ok(raw.into_iter().map(normalize_table).collect())
    }
}
