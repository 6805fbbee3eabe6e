//! Cart Items Repository

use sqlx::{FromRow, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use crate::domain::{
    carts::models::{CartItem, CartItemUuid, CartUuid, NewCartItem},
    products::models::ProductUuid,
    rows::try_get_counter,
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("../sql/delete_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartItemsRepository;

impl SqliteCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Sqlite, CartItem>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
        item: &NewCartItem,
    ) -> Result<CartItem, sqlx::Error> {
        query(CREATE_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(cart.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(i64::from(item.quantity))
            .execute(&mut **tx)
            .await?;

        Ok(CartItem {
            uuid: item.uuid,
            product_uuid: Some(item.product_uuid),
            quantity: item.quantity,
        })
    }

    /// Remove every item of the cart; used for wholesale replacement.
    pub(crate) async fn delete_cart_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartItem {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        use sqlx::Row as _;

        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: row
                .try_get::<Option<Uuid>, _>("product_uuid")?
                .map(ProductUuid::from_uuid),
            quantity: try_get_counter(row, "quantity")?,
        })
    }
}
