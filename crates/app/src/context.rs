//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, SqliteCartsService},
        products::{ProductsService, SqliteProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open database")]
    Database(#[source] sqlx::Error),
}

/// Service handles shared by every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
}

impl AppContext {
    /// Build application context from a database path.
    ///
    /// Opens the database (creating it when missing) and applies the schema.
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be opened or the schema
    /// cannot be applied.
    pub async fn from_database_path(path: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(path)
            .await
            .map_err(AppInitError::Database)?;

        database::apply_schema(&pool)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            products: Arc::new(SqliteProductsService::new(db.clone())),
            carts: Arc::new(SqliteCartsService::new(db)),
        })
    }
}
