//! Carts service.
//!
//! Every operation takes the caller identity explicitly and runs inside one
//! database transaction; stock reconciliation happens on the same
//! transaction, so a failed transition rolls the whole mutation back.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Sqlite, Transaction};

use crate::{
    database::Db,
    domain::{
        callers::CallerUuid,
        carts::{
            access,
            errors::CartsServiceError,
            models::{Cart, CartItem, CartUpdate, CartUuid, NewCart, NewCartItem},
            reconciliation::{self, StockTransition},
            repositories::{SqliteCartItemsRepository, SqliteCartsRepository, SqliteStockRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCartsService {
    db: Db,
    carts_repository: SqliteCartsRepository,
    items_repository: SqliteCartItemsRepository,
    stock_repository: SqliteStockRepository,
}

impl SqliteCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: SqliteCartsRepository::new(),
            items_repository: SqliteCartItemsRepository::new(),
            stock_repository: SqliteStockRepository::new(),
        }
    }

    /// Write the given items for the cart, validating against current stock.
    ///
    /// When the cart is about to complete, the guarded decrement that follows
    /// is the stock check; running a second one here would only reintroduce
    /// the double-validation the engine consolidates away.
    async fn write_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
        items: &[NewCartItem],
        completing: bool,
    ) -> Result<Vec<CartItem>, CartsServiceError> {
        let mut written = Vec::with_capacity(items.len());

        for item in items {
            if !completing {
                let stock = self
                    .stock_repository
                    .get_stock(tx, item.product_uuid)
                    .await?
                    .ok_or(CartsServiceError::ProductNotFound)?;

                if item.quantity > stock {
                    return Err(CartsServiceError::InsufficientStock {
                        product: item.product_uuid.into_uuid(),
                    });
                }
            }

            written.push(self.items_repository.create_cart_item(tx, cart, item).await?);
        }

        Ok(written)
    }
}

fn validate_quantities(items: &[NewCartItem]) -> Result<(), CartsServiceError> {
    if items.iter().any(|item| item.quantity == 0) {
        return Err(CartsServiceError::InvalidQuantity);
    }

    Ok(())
}

#[async_trait]
impl CartsService for SqliteCartsService {
    async fn get_cart(&self, caller: CallerUuid, uuid: CartUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self.carts_repository.get_cart(&mut tx, uuid).await?;

        access::authorize(caller, &cart)?;

        let items = self.items_repository.get_cart_items(&mut tx, uuid).await?;

        tx.commit().await?;

        cart.items = items;

        Ok(cart)
    }

    async fn list_carts(&self, caller: CallerUuid) -> Result<Vec<Cart>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut carts = self.carts_repository.list_carts(&mut tx, caller).await?;

        for cart in &mut carts {
            cart.items = self.items_repository.get_cart_items(&mut tx, cart.uuid).await?;
        }

        tx.commit().await?;

        Ok(carts)
    }

    async fn create_cart(
        &self,
        caller: CallerUuid,
        cart: NewCart,
    ) -> Result<Cart, CartsServiceError> {
        validate_quantities(&cart.items)?;

        let mut tx = self.db.begin().await?;

        let mut created = self.carts_repository.create_cart(&mut tx, caller, &cart).await?;

        let transition = StockTransition::from_flags(false, cart.order_completed);

        let items = self
            .write_items(&mut tx, cart.uuid, &cart.items, transition.is_some())
            .await?;

        if let Some(transition) = transition {
            let deltas =
                reconciliation::plan(items.iter().map(|item| (item.product_uuid, item.quantity)));

            reconciliation::apply(&mut tx, transition, &deltas, &self.stock_repository).await?;
        }

        tx.commit().await?;

        created.items = items;

        Ok(created)
    }

    async fn update_cart(
        &self,
        caller: CallerUuid,
        uuid: CartUuid,
        update: CartUpdate,
    ) -> Result<Cart, CartsServiceError> {
        if let Some(items) = &update.items {
            validate_quantities(items)?;
        }

        let mut tx = self.db.begin().await?;

        // Snapshot the persisted endpoints of the transition before any
        // write; the flag diff is the only reconciliation trigger.
        let old = self.carts_repository.get_cart(&mut tx, uuid).await?;

        access::authorize(caller, &old)?;

        let order_completed = update.order_completed.unwrap_or(old.order_completed);
        let delivery_time = update.delivery_time.or(old.delivery_time);

        let transition = StockTransition::from_flags(old.order_completed, order_completed);

        let items = match update.items {
            Some(items) => {
                self.items_repository.delete_cart_items(&mut tx, uuid).await?;

                self.write_items(
                    &mut tx,
                    uuid,
                    &items,
                    transition == Some(StockTransition::Complete),
                )
                .await?
            }
            None => self.items_repository.get_cart_items(&mut tx, uuid).await?,
        };

        self.carts_repository
            .update_cart(&mut tx, uuid, delivery_time, order_completed)
            .await?;

        if let Some(transition) = transition {
            // Both directions reconcile over the final item set, so a
            // replacement sent along with the flip settles on the
            // replacement quantities.
            let deltas =
                reconciliation::plan(items.iter().map(|item| (item.product_uuid, item.quantity)));

            reconciliation::apply(&mut tx, transition, &deltas, &self.stock_repository).await?;
        }

        tx.commit().await?;

        Ok(Cart {
            uuid,
            owner: old.owner,
            items,
            delivery_time,
            order_completed,
            created_at: old.created_at,
        })
    }

    async fn delete_cart(&self, caller: CallerUuid, uuid: CartUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_cart(&mut tx, uuid).await?;

        access::authorize(caller, &cart)?;

        // Items cascade with the cart. Deletion has no stock side effect,
        // even for completed carts; only an explicit flip back to draft
        // restocks.
        self.carts_repository.delete_cart(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a single cart owned by the caller.
    async fn get_cart(&self, caller: CallerUuid, uuid: CartUuid) -> Result<Cart, CartsServiceError>;

    /// Retrieve every cart owned by the caller.
    async fn list_carts(&self, caller: CallerUuid) -> Result<Vec<Cart>, CartsServiceError>;

    /// Create a cart owned by the caller, decrementing stock when it is
    /// created directly completed.
    async fn create_cart(
        &self,
        caller: CallerUuid,
        cart: NewCart,
    ) -> Result<Cart, CartsServiceError>;

    /// Apply a partial update, reconciling stock on completion transitions.
    async fn update_cart(
        &self,
        caller: CallerUuid,
        uuid: CartUuid,
        update: CartUpdate,
    ) -> Result<Cart, CartsServiceError>;

    /// Delete a cart and its items.
    async fn delete_cart(&self, caller: CallerUuid, uuid: CartUuid) -> Result<(), CartsServiceError>;
}
