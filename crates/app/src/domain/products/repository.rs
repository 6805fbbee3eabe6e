//! Products Repository

use jiff::Timestamp;
use sqlx::{FromRow, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::domain::{
    products::models::{NewProduct, Product, ProductUuid},
    rows::{try_get_amount, try_get_counter, try_get_date, try_get_timestamp},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteProductsRepository;

impl SqliteProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Sqlite, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Sqlite, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        let price = i64::try_from(product.price).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let now = Timestamp::now();

        query(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.overview)
            .bind(&product.model)
            .bind(product.year.to_string())
            .bind(i64::from(product.stock))
            .bind(price)
            .bind(now.to_string())
            .bind(now.to_string())
            .execute(&mut **tx)
            .await?;

        Ok(Product {
            uuid: product.uuid,
            name: product.name,
            overview: product.overview,
            model: product.model,
            year: product.year,
            stock: product.stock,
            price: product.price,
            created_at: now,
            updated_at: now,
        })
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Product {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        use sqlx::Row as _;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            overview: row.try_get("overview")?,
            model: row.try_get("model")?,
            year: try_get_date(row, "year")?,
            stock: try_get_counter(row, "stock")?,
            price: try_get_amount(row, "price")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
