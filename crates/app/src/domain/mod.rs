//! Shop Domain Concerns

pub mod callers;
pub mod carts;
pub mod products;

pub(crate) mod rows;
