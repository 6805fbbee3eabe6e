//! Shared application domain and persistence modules for the auto-parts shop.

pub mod context;
pub mod database;
pub mod domain;
pub mod uuids;

#[cfg(test)]
mod test;
