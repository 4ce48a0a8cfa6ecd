//! Catalog Item Entity
//!
//! Catalog rows are read-only to the shop.

use kernel::id::{AccountId, ItemId};

/// Merchandise that can be bought with coins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub item_id: ItemId,
    pub item_type: String,
    pub price: i64,
}

/// Outcome of a committed purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub buyer: AccountId,
    pub item_type: String,
    pub price: i64,
    pub balance_after: i64,
}
