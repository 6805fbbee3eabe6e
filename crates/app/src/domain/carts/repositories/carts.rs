//! Carts Repository

use jiff::Timestamp;
use sqlx::{FromRow, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::domain::{
    callers::CallerUuid,
    carts::models::{Cart, CartUuid, NewCart},
    rows::{try_get_opt_timestamp, try_get_timestamp},
};

const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const LIST_CARTS_SQL: &str = include_str!("../sql/list_carts.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const UPDATE_CART_SQL: &str = include_str!("../sql/update_cart.sql");
const DELETE_CART_SQL: &str = include_str!("../sql/delete_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartsRepository;

impl SqliteCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetch a cart row without its items; ownership is checked by the
    /// service after this read.
    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Sqlite, Cart>(GET_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_carts(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: CallerUuid,
    ) -> Result<Vec<Cart>, sqlx::Error> {
        query_as::<Sqlite, Cart>(LIST_CARTS_SQL)
            .bind(owner.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: CallerUuid,
        cart: &NewCart,
    ) -> Result<Cart, sqlx::Error> {
        let created_at = Timestamp::now();

        query(CREATE_CART_SQL)
            .bind(cart.uuid.into_uuid())
            .bind(owner.into_uuid())
            .bind(cart.delivery_time.map(|t| t.to_string()))
            .bind(cart.order_completed)
            .bind(created_at.to_string())
            .execute(&mut **tx)
            .await?;

        Ok(Cart {
            uuid: cart.uuid,
            owner,
            items: Vec::with_capacity(cart.items.len()),
            delivery_time: cart.delivery_time,
            order_completed: cart.order_completed,
            created_at,
        })
    }

    pub(crate) async fn update_cart(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
        delivery_time: Option<Timestamp>,
        order_completed: bool,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_SQL)
            .bind(delivery_time.map(|t| t.to_string()))
            .bind(order_completed)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Cart {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        use sqlx::Row as _;

        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            owner: CallerUuid::from_uuid(row.try_get("owner_uuid")?),
            items: Vec::new(),
            delivery_time: try_get_opt_timestamp(row, "delivery_time")?,
            order_completed: row.try_get("order_completed")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
