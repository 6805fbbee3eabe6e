//! Errors

use autoparts_app::domain::carts::CartsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Cart already exists"),
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("quantity: must be greater than zero")
        }
        CartsServiceError::InsufficientStock { .. } => StatusError::bad_request()
            .brief("quantity: higher number of quantity requested than in stock"),
        CartsServiceError::ProductNotFound => {
            StatusError::bad_request().brief("Unknown product in cart items")
        }
        // A foreign cart renders exactly like a missing one, so cart uuids
        // never leak across callers.
        CartsServiceError::NotFound | CartsServiceError::Forbidden => StatusError::not_found(),
        CartsServiceError::Sql(source) => {
            error!("carts storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
