//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use autoparts_app::domain::products::models::Product;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Products Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductSummaryResponse>,
}

/// Product Summary Response
///
/// The overview listing carries minimal information; the detail endpoint
/// returns the full record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSummaryResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The name of the car part
    pub name: String,

    /// A short description of the part
    pub overview: String,
}

impl From<Product> for ProductSummaryResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            name: product.name,
            overview: product.overview,
        }
    }
}

/// Product Index Handler
///
/// Returns a list of products. Publicly readable.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
