pub mod orders;
pub mod reservations;
pub mod tables;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;

use canteen_core::errors::{CanteenError, CanteenResult};
use canteen_core::models::order::{CreateOrderRequest, CreateOrderResponse};
use canteen_core::models::reservation::Reservation;
use canteen_core::models::table::Table;

use crate::config::ApiConfig;

pub use tables::TableWindow;

/// The backend surface the session layer depends on. `ApiClient` is the
/// live implementation; `crate::mock::MockBackend` stands in for tests.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn list_tables(&self, window: Option<TableWindow>) -> CanteenResult<Vec<Table>>;

    async fn list_reservations(
        &self,
        table_id: i64,
        date: NaiveDate,
    ) -> CanteenResult<Vec<Reservation>>;

    async fn create_reservation(&self, reservation: Reservation) -> CanteenResult<Reservation>;

    async fn delete_reservation(&self, reservation_id: i64) -> CanteenResult<()>;

    async fn create_order(&self, order: CreateOrderRequest) -> CanteenResult<CreateOrderResponse>;
}

/// HTTP client for the canteen backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BackendApi for ApiClient {
    async fn list_tables(&self, window: Option<TableWindow>) -> CanteenResult<Vec<Table>> {
        self.fetch_tables(window.as_ref()).await
    }

    async fn list_reservations(
        &self,
        table_id: i64,
        date: NaiveDate,
    ) -> CanteenResult<Vec<Reservation>> {
        self.fetch_reservations_for_table(table_id, date).await
    }

    async fn create_reservation(&self, reservation: Reservation) -> CanteenResult<Reservation> {
        self.submit_reservation(&reservation).await
    }

    async fn delete_reservation(&self, reservation_id: i64) -> CanteenResult<()> {
        self.cancel_reservation(reservation_id).await
    }

    async fn create_order(&self, order: CreateOrderRequest) -> CanteenResult<CreateOrderResponse> {
        self.submit_order(&order).await
    }
}

/// A transport failure while listing availability data. The server never
/// produced a message, so the error carries none.
pub(crate) fn fetch_transport_error(err: reqwest::Error) -> CanteenError {
    tracing::debug!(error = %err, "availability request failed in transport");
    CanteenError::AvailabilityFetch { message: None }
}

/// A transport failure on a write path (create/delete/order).
pub(crate) fn write_transport_error(err: reqwest::Error) -> CanteenError {
    tracing::debug!(error = %err, "backend write failed in transport");
    CanteenError::Internal(Box::new(err))
}

pub(crate) fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
