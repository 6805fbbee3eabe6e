//! Product Models

use jiff::{Timestamp, civil::Date};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
///
/// `stock` is the single inventory counter for the part; it is only ever
/// mutated by cart completion transitions and never drops below zero.
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub overview: String,
    pub model: String,
    pub year: Date,
    pub stock: u32,
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub overview: String,
    pub model: String,
    pub year: Date,
    pub stock: u32,
    pub price: u64,
}
