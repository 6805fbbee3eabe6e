//! Delete Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Delete Cart Handler
///
/// Deletes a cart and its items. Deleting a completed cart does not return
/// its quantities to stock; the order has already been settled.
#[endpoint(
    tags("carts"),
    summary = "Delete Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.delete",
    skip(cart, depot),
    fields(
        caller_uuid = tracing::field::Empty,
        cart_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_uuid_or_401()?;
    let cart = cart.into_inner();

    let span = tracing::Span::current();

    span.record("caller_uuid", tracing::field::display(caller));
    span.record("cart_uuid", tracing::field::display(cart));

    state
        .app
        .carts
        .delete_cart(caller, cart.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(cart_uuid = %cart, "deleted cart");

    Ok(StatusCode::NO_CONTENT)
}
