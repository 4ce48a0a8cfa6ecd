//! Account Entity
//!
//! Accounts are created on first successful authentication and never deleted.
//! Balance and inventory are mutated only by the ledger store.

use kernel::id::AccountId;

use crate::domain::entity::transfer::TransferRecord;
use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};

/// Credentials needed to authenticate an existing account
#[derive(Debug, Clone)]
pub struct AccountCredentials {
    pub account_id: AccountId,
    pub user_name: UserName,
    pub password_hash: UserPassword,
}

/// Consistent read of one account's state
///
/// The inventory is kept in its persisted form; decoding is the account
/// service's job.
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    /// Current coin balance (never negative)
    pub balance: i64,
    /// Persisted type → quantity mapping
    pub inventory_raw: Vec<u8>,
    /// Transfers where this account is the destination, oldest first
    pub received: Vec<TransferRecord>,
    /// Transfers where this account is the source, oldest first
    pub sent: Vec<TransferRecord>,
}
