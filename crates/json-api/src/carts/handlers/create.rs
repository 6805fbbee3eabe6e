//! Create Cart Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use autoparts_app::domain::carts::models::{CartItemUuid, CartUuid, NewCart, NewCartItem};

use crate::{
    carts::{errors::into_status_error, handlers::get::CartResponse},
    extensions::*,
    state::State,
};

/// Create Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCartRequest {
    /// The items to place in the cart
    #[serde(default)]
    pub items: Vec<CartItemRequest>,

    /// The requested delivery date and time, RFC 3339
    pub delivery_time: Option<String>,

    /// Whether the order is completed on creation; defaults to a draft
    pub order_completed: Option<bool>,
}

/// Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemRequest {
    /// The product to order
    pub product_uuid: Uuid,

    /// The quantity to order
    pub quantity: u32,
}

impl From<CartItemRequest> for NewCartItem {
    fn from(request: CartItemRequest) -> Self {
        Self {
            uuid: CartItemUuid::new(),
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
        }
    }
}

impl CreateCartRequest {
    fn into_new_cart(self, delivery_time: Option<Timestamp>) -> NewCart {
        NewCart {
            uuid: CartUuid::new(),
            items: self.items.into_iter().map(Into::into).collect(),
            delivery_time,
            order_completed: self.order_completed.unwrap_or(false),
        }
    }
}

/// Create Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Create Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCartRequest>,
    depot: &mut Depot,
    res: &mut Response,
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

    let cart = state
        .app
        .carts
        .create_cart(caller, request.into_new_cart(delivery_time))
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/carts/{}", cart.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(cart.into()))
}
