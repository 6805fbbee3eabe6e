//! Get Cart Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use autoparts_app::domain::carts::models::{Cart, CartItem};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The items in the cart
    pub items: Vec<CartItemResponse>,

    /// The requested delivery date and time, if chosen
    pub delivery_time: Option<String>,

    /// Whether the order has been completed
    pub order_completed: bool,

    /// The date and time the cart was created
    pub created_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            delivery_time: cart.delivery_time.as_ref().map(ToString::to_string),
            order_completed: cart.order_completed,
            created_at: cart.created_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The product in the cart item; null when the product was removed
    /// from the catalog
    pub product_uuid: Option<Uuid>,

    /// The ordered quantity
    pub quantity: u32,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.map(Into::into),
            quantity: item.quantity,
        }
    }
}

/// Get Cart Handler
///
/// Returns a cart owned by the caller.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(caller, cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use autoparts_app::domain::carts::{CartsServiceError, MockCartsService, models::CartUuid};

    use crate::test_helpers::{TEST_CALLER_UUID, carts_service, make_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("carts/{cart}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let mut repo = MockCartsService::new();
        let uuid = CartUuid::new();

        let cart = make_cart(uuid);

        repo.expect_get_cart()
            .once()
            .withf(move |caller, u| *caller == TEST_CALLER_UUID && *u == uuid)
            .return_once(move |_, _| Ok(cart));

        repo.expect_create_cart().never();
        repo.expect_update_cart().never();
        repo.expect_delete_cart().never();

        let mut res = TestClient::get(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(repo))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert!(!body.order_completed);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_cart_returns_404() -> TestResult {
        let mut repo = MockCartsService::new();
        let uuid = CartUuid::new();

        repo.expect_get_cart()
            .once()
            .withf(move |caller, u| *caller == TEST_CALLER_UUID && *u == uuid)
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_foreign_cart_renders_as_404() -> TestResult {
        let mut repo = MockCartsService::new();
        let uuid = CartUuid::new();

        repo.expect_get_cart()
            .once()
            .return_once(|_, _| Err(CartsServiceError::Forbidden));

        let res = TestClient::get(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
