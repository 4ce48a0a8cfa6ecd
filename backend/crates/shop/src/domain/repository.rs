//! Repository Traits
//!
//! Interface of the ledger store. Implementations live in the infrastructure
//! layer.
//!
//! ## Concurrency contract
//! - Every mutating method is one all-or-nothing transaction.
//! - Balances never go below zero; the store itself rejects the debit
//!   (no read-check-write in application code).
//! - Operations on the same account are serialized by the store
//!   (row lock in Postgres, a single mutex in memory).
//! - Dropping a returned future before completion leaves either the committed
//!   or the rolled-back state, never a partial one.

use kernel::id::{AccountId, ItemId};

use crate::domain::entity::{
    AccountCredentials, AccountSnapshot, CatalogItem, Purchase, Transfer,
};
use crate::domain::value_object::{
    coin_amount::CoinAmount, user_name::UserName, user_password::UserPassword,
};
use crate::error::ShopResult;

/// Ledger repository trait
#[trait_variant::make(LedgerRepository: Send)]
pub trait LocalLedgerRepository {
    /// Find the stored credentials of an account by user name
    async fn find_credentials(&self, user_name: &UserName)
    -> ShopResult<Option<AccountCredentials>>;

    /// Create an account with the starting balance and an empty inventory
    ///
    /// Returns `None` when the user name is already taken (e.g. a concurrent
    /// first login committed first).
    async fn create_account(
        &self,
        user_name: &UserName,
        password_hash: &UserPassword,
    ) -> ShopResult<Option<AccountId>>;

    /// Move `amount` coins from `from` to the account named `to`
    ///
    /// Fails with `InsufficientFunds` or `NoSuchAccount`.
    async fn send_coin(
        &self,
        from: AccountId,
        to: &UserName,
        amount: CoinAmount,
    ) -> ShopResult<Transfer>;

    /// Charge the item's price and add one unit of its type to the inventory
    ///
    /// Fails with `NoSuchItem` or `InsufficientFunds`.
    async fn buy_item(&self, buyer: AccountId, item_id: ItemId) -> ShopResult<Purchase>;

    /// Balance, raw inventory and transfer history as one consistent read
    async fn account_snapshot(&self, account_id: AccountId) -> ShopResult<AccountSnapshot>;

    /// Look up a catalog item
    async fn find_item(&self, item_id: ItemId) -> ShopResult<Option<CatalogItem>>;
}
