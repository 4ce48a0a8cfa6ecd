//! Domain Layer
//!
//! Contains entities, value objects, and the ledger repository trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{AccountCredentials, AccountSnapshot, CatalogItem, Purchase, Transfer};
pub use repository::LedgerRepository;
pub use value_object::inventory::{Inventory, InventoryItem};
