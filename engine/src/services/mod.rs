//! Service implementations
//!
//! Real implementations of the `StoreGateway` trait.

pub mod json_store;
pub mod memory_store;

#[cfg(test)]
mod tests;

pub use json_store::{DEFAULT_DATA_FILE, RealJsonStore};
pub use memory_store::InMemoryStore;
