//! Transfer Entity
//!
//! Append-only audit record of a coin transfer, written in the same
//! transaction as the balance mutation it documents.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;

use crate::domain::value_object::coin_amount::CoinAmount;

/// A committed transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: CoinAmount,
    pub created_at: DateTime<Utc>,
}

/// A transfer as seen from one side, with the other side's name resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    /// User name of the other account
    pub counterpart: String,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}
