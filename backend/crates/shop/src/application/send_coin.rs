//! Send Coin Use Case
//!
//! Transfers coins from the calling account to another account by name.

use std::sync::Arc;

use crate::application::authorize::Identity;
use crate::application::config::ShopConfig;
use crate::application::deadline::with_deadline;
use crate::domain::entity::Transfer;
use crate::domain::repository::LedgerRepository;
use crate::domain::value_object::{coin_amount::CoinAmount, user_name::UserName};
use crate::error::{ShopError, ShopResult};

/// Send coin input
pub struct SendCoinInput {
    pub to_user: String,
    pub amount: i64,
}

/// Send coin use case
pub struct SendCoinUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<ShopConfig>,
}

impl<R> SendCoinUseCase<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ShopConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, identity: Identity, input: SendCoinInput) -> ShopResult<Transfer> {
        let amount = CoinAmount::new(input.amount).ok_or(ShopError::InvalidCoinAmount)?;
        // A name that cannot be registered cannot have an account
        let to_user = UserName::new(&input.to_user).map_err(|_| ShopError::NoSuchAccount)?;

        let transfer = with_deadline(
            self.config.operation_timeout,
            self.repo.send_coin(identity.account_id, &to_user, amount),
        )
        .await?;

        tracing::info!(
            from = %transfer.from,
            to = %transfer.to,
            amount = %transfer.amount,
            "Coins sent"
        );

        Ok(transfer)
    }
}
