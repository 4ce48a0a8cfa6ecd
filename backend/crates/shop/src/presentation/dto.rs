//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::AccountInfo;
use crate::domain::entity::TransferRecord;
use crate::domain::value_object::inventory::InventoryItem;

// ============================================================================
// Authenticate
// ============================================================================

/// Authenticate request
#[derive(Debug, Clone, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// Authenticate response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

// ============================================================================
// Send Coin
// ============================================================================

/// Send coin request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCoinRequest {
    #[serde(alias = "to_user")]
    pub to_user: String,
    pub amount: i64,
}

// ============================================================================
// Info
// ============================================================================

/// Account info response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub coins: i64,
    pub inventory: Vec<InventoryItem>,
    pub coin_history: CoinHistory,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoinHistory {
    pub received: Vec<ReceivedEntry>,
    pub sent: Vec<SentEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedEntry {
    pub from_user: String,
    pub amount: i64,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentEntry {
    pub to_user: String,
    pub amount: i64,
    pub at: DateTime<Utc>,
}

impl From<TransferRecord> for ReceivedEntry {
    fn from(record: TransferRecord) -> Self {
        Self {
            from_user: record.counterpart,
            amount: record.amount,
            at: record.created_at,
        }
    }
}

impl From<TransferRecord> for SentEntry {
    fn from(record: TransferRecord) -> Self {
        Self {
            to_user: record.counterpart,
            amount: record.amount,
            at: record.created_at,
        }
    }
}

impl From<AccountInfo> for InfoResponse {
    fn from(info: AccountInfo) -> Self {
        Self {
            coins: info.coins,
            inventory: info.inventory,
            coin_history: CoinHistory {
                received: info.received.into_iter().map(Into::into).collect(),
                sent: info.sent.into_iter().map(Into::into).collect(),
            },
        }
    }
}
