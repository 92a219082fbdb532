//! Order storage adapters.

mod file_order_store;
mod in_memory_order_store;

pub use file_order_store::FileOrderStore;
pub use in_memory_order_store::InMemoryOrderStore;
