use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{CanteenError, CanteenResult};
use crate::models::slot::TimeSlot;

/// A table reservation. `id` is `None` while the record is a local-only
/// intent; the server assigns an id once the create call succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Option<i64>,
    pub table_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub party_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
}

impl Reservation {
    /// Build a pending reservation for one slot of the operating day.
    /// No network call is made; the record becomes authoritative only
    /// after the backend accepts it and returns an id.
    pub fn pending(
        table_id: i64,
        date: NaiveDate,
        slot: &TimeSlot,
        party_size: u32,
    ) -> CanteenResult<Self> {
        if party_size == 0 {
            return Err(CanteenError::Validation(
                "Party size must be at least 1".to_string(),
            ));
        }
        let (start_time, end_time) = slot.bounds_on(date);
        Ok(Self {
            id: None,
            table_id,
            start_time,
            end_time,
            party_size,
            customer_id: None,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_none()
    }
}
