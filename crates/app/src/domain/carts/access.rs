//! Access control gate for carts.
//!
//! All products are publicly readable; carts are visible and mutable only to
//! their owner. The owner is stamped at creation and never changes.

use crate::domain::{callers::CallerUuid, carts::{errors::CartsServiceError, models::Cart}};

/// Allow the operation iff the cart belongs to the caller.
///
/// # Errors
///
/// Returns [`CartsServiceError::Forbidden`] for any other caller. The HTTP
/// layer renders this as a 404 so foreign cart uuids are indistinguishable
/// from absent ones.
pub fn authorize(caller: CallerUuid, cart: &Cart) -> Result<(), CartsServiceError> {
    if cart.owner == caller {
        Ok(())
    } else {
        Err(CartsServiceError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::carts::models::CartUuid;

    use super::*;

    fn make_cart(owner: CallerUuid) -> Cart {
        Cart {
            uuid: CartUuid::new(),
            owner,
            items: vec![],
            delivery_time: None,
            order_completed: false,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn owner_is_allowed() {
        let caller = CallerUuid::new();
        let cart = make_cart(caller);

        assert!(authorize(caller, &cart).is_ok(), "owner should be allowed");
    }

    #[test]
    fn other_caller_is_forbidden() {
        let cart = make_cart(CallerUuid::new());

        let result = authorize(CallerUuid::new(), &cart);

        assert!(
            matches!(result, Err(CartsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );
    }
}
