//! Buy Item Use Case
//!
//! Spends coins on one unit of a catalog item.

use std::sync::Arc;

use kernel::id::ItemId;

use crate::application::authorize::Identity;
use crate::application::config::ShopConfig;
use crate::application::deadline::with_deadline;
use crate::domain::entity::Purchase;
use crate::domain::repository::LedgerRepository;
use crate::error::{ShopError, ShopResult};

/// Buy item use case
pub struct BuyItemUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<ShopConfig>,
}

impl<R> BuyItemUseCase<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ShopConfig>) -> Self {
        Self { repo, config }
    }

    /// `item_id` is the raw path segment supplied by the client
    pub async fn execute(&self, identity: Identity, item_id: &str) -> ShopResult<Purchase> {
        let item_id: ItemId = item_id.parse().map_err(|_| ShopError::InvalidItemId)?;

        // One deadline covers the lookup and the purchase
        let purchase = with_deadline(self.config.operation_timeout, async {
            // Unknown items are rejected without opening a write transaction
            if self.repo.find_item(item_id).await?.is_none() {
                return Err(ShopError::NoSuchItem);
            }
            self.repo.buy_item(identity.account_id, item_id).await
        })
        .await?;

        tracing::info!(
            account_id = %identity.account_id,
            item_id = %item_id,
            item_type = %purchase.item_type,
            price = purchase.price,
            balance = purchase.balance_after,
            "Item purchased"
        );

        Ok(purchase)
    }
}
