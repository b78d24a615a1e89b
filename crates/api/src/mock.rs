use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;

use canteen_core::errors::CanteenResult;
use canteen_core::models::order::{CreateOrderRequest, CreateOrderResponse};
use canteen_core::models::reservation::Reservation;
use canteen_core::models::table::Table;

use crate::clients::{BackendApi, TableWindow};

// Mock backend for testing the session layer without a live server.
mock! {
    pub Backend {}

    #[async_trait]
    impl BackendApi for Backend {
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
}
