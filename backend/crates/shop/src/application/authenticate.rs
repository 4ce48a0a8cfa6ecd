//! Authenticate Use Case
//!
//! Signs a user in, creating the account on first use, and issues an
//! identity token.

use std::sync::Arc;

use kernel::id::AccountId;
use platform::password::PasswordVerifyError;
use platform::token::TokenIssuer;

use crate::application::config::ShopConfig;
use crate::application::deadline::with_deadline;
use crate::domain::entity::AccountCredentials;
use crate::domain::repository::LedgerRepository;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{ShopError, ShopResult};

/// Authenticate input
pub struct AuthenticateInput {
    pub user_name: String,
    pub password: String,
}

/// Authenticate output
#[derive(Debug)]
pub struct AuthenticateOutput {
    /// Signed identity token
    pub token: String,
    pub account_id: AccountId,
    /// True when this call created the account
    pub created: bool,
}

/// Authenticate use case
pub struct AuthenticateUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<ShopConfig>,
    tokens: TokenIssuer,
}

impl<R> AuthenticateUseCase<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ShopConfig>) -> Self {
        let tokens = config.token_issuer();
        Self {
            repo,
            config,
            tokens,
        }
    }

    pub async fn execute(&self, input: AuthenticateInput) -> ShopResult<AuthenticateOutput> {
        // Validation happens before any store access
        let raw_password =
            RawPassword::new(input.password).map_err(|_| ShopError::InvalidPassword)?;
        let user_name = UserName::new(&input.user_name).map_err(|_| ShopError::InvalidUserName)?;

        let existing = with_deadline(
            self.config.operation_timeout,
            self.repo.find_credentials(&user_name),
        )
        .await?;

        let (account_id, created) = match existing {
            Some(credentials) => {
                self.verify(&credentials, &raw_password)?;
                (credentials.account_id, false)
            }
            None => self.sign_up(&user_name, &raw_password).await?,
        };

        let token = self
            .tokens
            .issue(&account_id.to_string())
            .map_err(|e| ShopError::Internal(e.to_string()))?;

        tracing::info!(
            account_id = %account_id,
            user_name = %user_name,
            created,
            "User authenticated"
        );

        Ok(AuthenticateOutput {
            token,
            account_id,
            created,
        })
    }

    /// Create the account; if a concurrent first login won the insert,
    /// authenticate against the winner's credentials instead.
    async fn sign_up(
        &self,
        user_name: &UserName,
        raw_password: &RawPassword,
    ) -> ShopResult<(AccountId, bool)> {
        let password_hash = UserPassword::from_raw(raw_password, self.config.pepper())
            .map_err(|e| ShopError::Internal(e.to_string()))?;

        let inserted = with_deadline(
            self.config.operation_timeout,
            self.repo.create_account(user_name, &password_hash),
        )
        .await?;

        if let Some(account_id) = inserted {
            return Ok((account_id, true));
        }

        tracing::debug!(user_name = %user_name, "Lost first-login race, re-reading account");

        let credentials = with_deadline(
            self.config.operation_timeout,
            self.repo.find_credentials(user_name),
        )
        .await?
        .ok_or_else(|| {
            ShopError::Internal(format!("account {user_name} missing after conflicting insert"))
        })?;

        self.verify(&credentials, raw_password)?;
        Ok((credentials.account_id, false))
    }

    fn verify(
        &self,
        credentials: &AccountCredentials,
        raw_password: &RawPassword,
    ) -> ShopResult<()> {
        credentials
            .password_hash
            .verify(raw_password, self.config.pepper())
            .map_err(|e| match e {
                PasswordVerifyError::Mismatch => ShopError::PasswordMismatch,
                PasswordVerifyError::Backend(msg) => ShopError::Internal(msg),
            })
    }
}
