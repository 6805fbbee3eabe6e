//! Cart Repositories

mod carts;
mod items;
mod stock;

pub(crate) use carts::SqliteCartsRepository;
pub(crate) use items::SqliteCartItemsRepository;
pub(crate) use stock::SqliteStockRepository;
