//! Update Cart Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use autoparts_app::domain::carts::models::CartUpdate;

use crate::{
    carts::{
        errors::into_status_error,
        handlers::{create::CartItemRequest, get::CartResponse},
    },
    extensions::*,
    state::State,
};

/// Update Cart Request
///
/// Absent fields keep their stored values; a present `items` replaces the
/// item set wholesale. Flipping `order_completed` settles the cart's
/// quantities against product stock.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartRequest {
    /// Replacement items for the cart
    pub items: Option<Vec<CartItemRequest>>,

    /// The requested delivery date and time, RFC 3339
    pub delivery_time: Option<String>,

    /// Whether the order has been completed
    pub order_completed: Option<bool>,
}

impl UpdateCartRequest {
    fn into_cart_update(self, delivery_time: Option<Timestamp>) -> CartUpdate {
        CartUpdate {
            items: self
                .items
                .map(|items| items.into_iter().map(Into::into).collect()),
            delivery_time,
            order_completed: self.order_completed,
        }
    }
}

/// Update Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Update Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<UpdateCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_uuid_or_401()?;

    let request = json.into_inner();

    let delivery_time = request
        .delivery_time
        .as_deref()
        .map(str::parse::<Timestamp>)
        .transpose()
        .or_400("delivery_time: invalid timestamp")?;

    let updated = state
        .app
        .carts
        .update_cart(
            caller,
            cart.into_inner().into(),
            request.into_cart_update(delivery_time),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use autoparts_app::domain::carts::{CartsServiceError, MockCartsService, models::CartUuid};

    use crate::test_helpers::{TEST_CALLER_UUID, carts_service, make_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("carts/{cart}").patch(handler))
    }

    #[tokio::test]
    async fn test_update_completes_order() -> TestResult {
        let uuid = CartUuid::new();

        let mut cart = make_cart(uuid);
        cart.order_completed = true;

        let mut repo = MockCartsService::new();

        repo.expect_update_cart()
            .once()
            .withf(move |caller, u, update| {
                *caller == TEST_CALLER_UUID
                    && *u == uuid
                    && update.items.is_none()
                    && update.order_completed == Some(true)
            })
            .return_once(move |_, _, _| Ok(cart));

        repo.expect_get_cart().never();
        repo.expect_delete_cart().never();

        let mut res = TestClient::patch(format!("http://example.com/carts/{uuid}"))
            .json(&json!({ "order_completed": true }))
            .send(&make_service(repo))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.order_completed);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_replaces_items() -> TestResult {
        let uuid = CartUuid::new();
        let product = Uuid::now_v7();
        let cart = make_cart(uuid);

        let mut repo = MockCartsService::new();

        repo.expect_update_cart()
            .once()
            .withf(move |_, _, update| {
                update
                    .items
                    .as_ref()
                    .is_some_and(|items| {
                        items.len() == 1
                            && items[0].product_uuid == product.into()
                            && items[0].quantity == 4
                    })
            })
            .return_once(move |_, _, _| Ok(cart));

        let res = TestClient::patch(format!("http://example.com/carts/{uuid}"))
            .json(&json!({ "items": [{ "product_uuid": product, "quantity": 4 }] }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_insufficient_stock_returns_400() -> TestResult {
        let uuid = CartUuid::new();
        let product = Uuid::now_v7();

        let mut repo = MockCartsService::new();

        repo.expect_update_cart()
            .once()
            .return_once(move |_, _, _| Err(CartsServiceError::InsufficientStock { product }));

        let res = TestClient::patch(format!("http://example.com/carts/{uuid}"))
            .json(&json!({ "order_completed": true }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_foreign_cart_renders_as_404() -> TestResult {
        let uuid = CartUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_update_cart()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::Forbidden));

        let res = TestClient::patch(format!("http://example.com/carts/{uuid}"))
            .json(&json!({ "order_completed": false }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_zero_quantity_returns_400() -> TestResult {
        let uuid = CartUuid::new();
        let product = Uuid::now_v7();

        let mut repo = MockCartsService::new();

        repo.expect_update_cart()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::InvalidQuantity));

        let mut res = TestClient::patch(format!("http://example.com/carts/{uuid}"))
            .json(&json!({ "items": [{ "product_uuid": product, "quantity": 0 }] }))
            .send(&make_service(repo))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(body.contains("must be greater than zero"));

        Ok(())
    }
}
