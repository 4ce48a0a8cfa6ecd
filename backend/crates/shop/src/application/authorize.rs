//! Authorization Gate
//!
//! Turns the token string carried by a request into a verified caller
//! identity. This is the only place identity tokens are parsed.
//!
//! Per request the gate moves from unauthenticated to authenticated exactly
//! once or rejects; there are no retries. A missing token and an invalid or
//! expired token are indistinguishable to the caller.

use kernel::id::AccountId;
use platform::token::TokenIssuer;

use crate::application::config::ShopConfig;
use crate::error::{ShopError, ShopResult};

/// Verified caller identity, passed explicitly into every account operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub account_id: AccountId,
}

/// Per-request identity gate
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    tokens: TokenIssuer,
}

impl AuthorizationGate {
    pub fn new(tokens: TokenIssuer) -> Self {
        Self { tokens }
    }

    pub fn from_config(config: &ShopConfig) -> Self {
        Self::new(config.token_issuer())
    }

    /// Verify `token` and resolve the caller
    pub fn authorize(&self, token: Option<&str>) -> ShopResult<Identity> {
        let token = token.ok_or(ShopError::Unauthorized)?;

        let claims = self
            .tokens
            .verify(token)
            .map_err(|_| ShopError::Unauthorized)?;

        let account_id = claims
            .sub
            .parse::<AccountId>()
            .map_err(|_| ShopError::Unauthorized)?;

        Ok(Identity { account_id })
    }
}
