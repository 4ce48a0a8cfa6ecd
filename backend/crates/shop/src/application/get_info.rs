//! Get Info Use Case
//!
//! Balance, inventory and coin history of the calling account.

use std::sync::Arc;

use crate::application::authorize::Identity;
use crate::application::config::ShopConfig;
use crate::application::deadline::with_deadline;
use crate::domain::entity::TransferRecord;
use crate::domain::repository::LedgerRepository;
use crate::domain::value_object::inventory::{Inventory, InventoryItem};
use crate::error::ShopResult;

/// Get info output
#[derive(Debug, Clone)]
pub struct AccountInfo {
    pub coins: i64,
    /// Ascending by item type
    pub inventory: Vec<InventoryItem>,
    pub received: Vec<TransferRecord>,
    pub sent: Vec<TransferRecord>,
}

/// Get info use case
pub struct GetInfoUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<ShopConfig>,
}

impl<R> GetInfoUseCase<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ShopConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, identity: Identity) -> ShopResult<AccountInfo> {
        let snapshot = with_deadline(
            self.config.operation_timeout,
            self.repo.account_snapshot(identity.account_id),
        )
        .await?;

        let inventory = Inventory::decode(&snapshot.inventory_raw)?;

        Ok(AccountInfo {
            coins: snapshot.balance,
            inventory: inventory.items(),
            received: snapshot.received,
            sent: snapshot.sent,
        })
    }
}
