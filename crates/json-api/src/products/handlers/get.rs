//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use autoparts_app::domain::products::models::Product;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Product Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The name of the car part
    pub name: String,

    /// A short description of the part
    pub overview: String,

    /// The car model the part is for
    pub model: String,

    /// The model year of the car
    pub year: String,

    /// Units available in inventory
    pub stock: u32,

    /// Price in minor currency units
    pub price: u64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            name: product.name,
            overview: product.overview,
            model: product.model,
            year: product.year.to_string(),
            stock: product.stock,
            price: product.price,
        }
    }
}

/// Get Product Handler
///
/// Returns the full details of a product. Publicly readable.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
