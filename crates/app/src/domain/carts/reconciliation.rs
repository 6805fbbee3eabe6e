//! Stock reconciliation engine.
//!
//! Keeps `products.stock` consistent with the set of completed carts. The
//! only trigger is the `order_completed` flag flipping between its persisted
//! value and the requested one; item edits without a flip never move stock.
//! Deltas are always built from the *final* item set of the mutation, so a
//! simultaneous item replacement and flip settles on the replacement
//! quantities.

use sqlx::{Sqlite, Transaction};

use crate::domain::{
    carts::{errors::CartsServiceError, repositories::SqliteStockRepository},
    products::models::ProductUuid,
};

/// A completion-flag transition that moves stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StockTransition {
    /// `DRAFT -> COMPLETED`: decrement stock by each item quantity.
    Complete,
    /// `COMPLETED -> DRAFT`: restock each item quantity.
    Reverse,
}

impl StockTransition {
    /// Derive the transition from the persisted flag and the requested one.
    ///
    /// `None` when the flag does not flip; the engine never infers a
    /// transition from item contents.
    pub(crate) fn from_flags(old: bool, new: bool) -> Option<Self> {
        match (old, new) {
            (false, true) => Some(Self::Complete),
            (true, false) => Some(Self::Reverse),
            (false, false) | (true, true) => None,
        }
    }
}

/// One product's share of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StockDelta {
    pub(crate) product: ProductUuid,
    pub(crate) quantity: u32,
}

/// Build the per-item stock deltas for a transition from the final item set.
///
/// Items whose product was removed from the catalog carry no delta.
pub(crate) fn plan<I>(items: I) -> Vec<StockDelta>
where
    I: IntoIterator<Item = (Option<ProductUuid>, u32)>,
{
    items
        .into_iter()
        .filter_map(|(product, quantity)| product.map(|product| StockDelta { product, quantity }))
        .collect()
}

/// Apply a transition's deltas inside the enclosing cart transaction.
///
/// The decrement is a guarded update; a guard miss means the cart would
/// drive stock negative, and the returned error aborts the whole
/// transaction so no delta from this transition sticks. Restocking cannot
/// fail on stock grounds.
pub(crate) async fn apply(
    tx: &mut Transaction<'_, Sqlite>,
    transition: StockTransition,
    deltas: &[StockDelta],
    stock: &SqliteStockRepository,
) -> Result<(), CartsServiceError> {
    for delta in deltas {
        match transition {
            StockTransition::Complete => {
                let rows_affected = stock.decrement(tx, delta.product, delta.quantity).await?;

                if rows_affected == 0 {
                    return Err(CartsServiceError::InsufficientStock {
                        product: delta.product.into_uuid(),
                    });
                }
            }
            StockTransition::Reverse => {
                stock.increment(tx, delta.product, delta.quantity).await?;
            }
        }
    }

    tracing::debug!(?transition, deltas = deltas.len(), "applied stock transition");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_flip_up_completes() {
        assert_eq!(
            StockTransition::from_flags(false, true),
            Some(StockTransition::Complete),
            "draft to completed should decrement"
        );
    }

    #[test]
    fn flag_flip_down_reverses() {
        assert_eq!(
            StockTransition::from_flags(true, false),
            Some(StockTransition::Reverse),
            "completed to draft should restock"
        );
    }

    #[test]
    fn unchanged_flag_moves_no_stock() {
        assert_eq!(
            StockTransition::from_flags(false, false),
            None,
            "draft to draft is not a transition"
        );
        assert_eq!(
            StockTransition::from_flags(true, true),
            None,
            "completed to completed is not a transition"
        );
    }

    #[test]
    fn plan_skips_nulled_product_references() {
        let product = ProductUuid::new();

        let deltas = plan(vec![(None, 4), (Some(product), 2)]);

        assert_eq!(
            deltas,
            vec![StockDelta {
                product,
                quantity: 2
            }],
            "nulled references carry no delta"
        );
    }

    #[test]
    fn plan_keeps_repeated_products_as_separate_deltas() {
        let product = ProductUuid::new();

        let deltas = plan(vec![(Some(product), 1), (Some(product), 3)]);

        assert_eq!(deltas.len(), 2, "one delta per item");
        assert_eq!(deltas[0].quantity, 1);
        assert_eq!(deltas[1].quantity, 3);
    }
}
