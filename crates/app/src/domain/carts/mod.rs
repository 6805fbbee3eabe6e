//! Cart Aggregate and the stock reconciliation around it

pub mod access;
pub mod errors;
pub mod models;
pub(crate) mod reconciliation;
pub(crate) mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
