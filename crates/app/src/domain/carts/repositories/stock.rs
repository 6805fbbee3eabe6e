//! Stock Repository
//!
//! The only writers of `products.stock`. Both statements run inside the
//! enclosing cart transaction, so a failed transition leaves every counter
//! untouched.

use jiff::Timestamp;
use sqlx::{Row, Sqlite, Transaction, query};

use crate::domain::products::models::ProductUuid;

const GET_STOCK_SQL: &str = include_str!("../sql/get_stock.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("../sql/decrement_stock.sql");
const INCREMENT_STOCK_SQL: &str = include_str!("../sql/increment_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteStockRepository;

impl SqliteStockRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Current stock of a product, `None` when the product does not exist.
    pub(crate) async fn get_stock(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductUuid,
    ) -> Result<Option<u32>, sqlx::Error> {
        let row = query(GET_STOCK_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| {
            let stock: i64 = row.try_get("stock")?;

            u32::try_from(stock).map_err(|e| sqlx::Error::ColumnDecode {
                index: "stock".to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
    }

    /// Guarded decrement: affects zero rows when the product is missing or
    /// the decrement would drive stock negative.
    pub(crate) async fn decrement(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(i64::from(quantity))
            .bind(Timestamp::now().to_string())
            .bind(product.into_uuid())
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn increment(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_STOCK_SQL)
            .bind(i64::from(quantity))
            .bind(Timestamp::now().to_string())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
