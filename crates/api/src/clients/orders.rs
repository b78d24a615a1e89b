use tracing::debug;

use canteen_core::errors::{CanteenError, CanteenResult};
use canteen_core::models::order::{CreateOrderRequest, CreateOrderResponse};

use crate::clients::{write_transport_error, ApiClient};

impl ApiClient {
    /// Submit an order for the committed table. Pricing, stock, and the
    /// final total are all computed server-side.
    pub async fn submit_order(
        &self,
        order: &CreateOrderRequest,
    ) -> CanteenResult<CreateOrderResponse> {
        let response = self
            .http
            .post(self.url("/api/orders"))
            .json(order)
            .send()
            .await
            .map_err(write_transport_error)?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CanteenError::Internal(
                format!("order request failed: {}", text.trim()).into(),
            ));
        }

        let confirmation: CreateOrderResponse =
            response.json().await.map_err(write_transport_error)?;
        debug!(order_id = confirmation.id, table_id = order.table_id, "order accepted");
        Ok(confirmation)
    }
}
