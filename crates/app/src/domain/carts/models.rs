//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::{callers::CallerUuid, products::models::ProductUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Model
///
/// A draft cart (`order_completed == false`) has no effect on stock; a
/// completed cart's item quantities are reserved against product stock.
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: CartUuid,
    pub owner: CallerUuid,
    pub items: Vec<CartItem>,
    pub delivery_time: Option<Timestamp>,
    pub order_completed: bool,
    pub created_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// CartItem Model
///
/// `product_uuid` is `None` when the product was removed from the catalog
/// after the item was added; the item itself survives.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: Option<ProductUuid>,
    pub quantity: u32,
}

/// New Cart Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCart {
    pub uuid: CartUuid,
    pub items: Vec<NewCartItem>,
    pub delivery_time: Option<Timestamp>,
    pub order_completed: bool,
}

/// New Cart Item Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// Partial Cart Update Model
///
/// Absent fields default to the persisted values; a present `items` replaces
/// the item set wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartUpdate {
    pub items: Option<Vec<NewCartItem>>,
    pub delivery_time: Option<Timestamp>,
    pub order_completed: Option<bool>,
}
