//! Normalization boundary for backend payloads.
//!
//! The backend is not consistent about field spellings (`number` vs
//! `table_number`, camelCase vs snake_case timestamps, instants with or
//! without a UTC offset). Every possible server shape is mapped into one
//! canonical internal record here, immediately after decode, so the rest
//! of the workspace only ever sees one shape.

use chrono::{DateTime, NaiveDateTime};
use eyre::{bail, Result};
use serde::Deserialize;

use canteen_core::models::reservation::Reservation;
use canteen_core::models::table::{Table, TableStatus};

/// A table as the server sends it, before normalization.
#[derive(Debug, Deserialize)]
pub struct RawTable {
    pub id: i64,
    #[serde(alias = "table_number")]
    pub number: i32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "seats")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A reservation as the server sends it, before normalization.
#[derive(Debug, Deserialize)]
pub struct RawReservation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "tableId")]
    pub table_id: i64,
    #[serde(alias = "startTime")]
    pub start_time: String,
    #[serde(alias = "endTime")]
    pub end_time: String,
    #[serde(default = "default_party_size", alias = "partySize", alias = "guest_count")]
    pub party_size: u32,
    #[serde(default, alias = "customerId", alias = "user_id", alias = "userId")]
    pub customer_id: Option<i64>,
}

fn default_party_size() -> u32 {
    1
}

pub fn normalize_table(raw: RawTable) -> Table {
    Table {
        id: raw.id,
        number: raw.number,
        location: raw.location,
        capacity: raw.capacity.unwrap_or(0),
        status: parse_status(raw.status.as_deref()),
    }
}

fn parse_status(raw: Option<&str>) -> TableStatus {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("available") => TableStatus::Available,
        Some("reserved") => TableStatus::Reserved,
        Some("occupied") => TableStatus::Occupied,
        // A status we cannot read must not make the table selectable.
        Some(_) | None => TableStatus::Occupied,
    }
}

pub fn normalize_reservation(raw: RawReservation) -> Result<Reservation> {
    let start_time = parse_wall_clock(&raw.start_time)?;
    let end_time = parse_wall_clock(&raw.end_time)?;
    if start_time >= end_time {
        bail!(
            "reservation {:?} has an empty or inverted window ({} >= {})",
            raw.id,
            start_time,
            end_time
        );
    }
    Ok(Reservation {
        id: raw.id,
        table_id: raw.table_id,
        start_time,
        end_time,
        party_size: raw.party_size,
        customer_id: raw.customer_id,
    })
}

/// Accepts instants with or without a UTC offset and reduces them to the
/// wall-clock form the rest of the client works in.
pub fn parse_wall_clock(value: &str) -> Result<NaiveDateTime> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.naive_local());
    }
    if let Ok(instant) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(instant);
    }
    if let Ok(instant) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(instant);
    }
    bail!("unrecognized instant: {value}")
}
