//! Entity Module

pub mod account;
pub mod catalog_item;
pub mod transfer;

pub use account::{AccountCredentials, AccountSnapshot};
pub use catalog_item::{CatalogItem, Purchase};
pub use transfer::{Transfer, TransferRecord};
