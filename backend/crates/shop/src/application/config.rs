//! Application Configuration
//!
//! Configuration for the Shop application layer.

use std::time::Duration;

use platform::cookie::{CookieConfig, DEFAULT_TOKEN_COOKIE};
use platform::token::{DEFAULT_TOKEN_TTL, TokenIssuer, TokenSecret};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Issuer tag written into every identity token
pub const TOKEN_ISSUER: &str = "merch-shop";

/// Default deadline for one account service operation
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(3);

/// Shop application configuration
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Name of the cookie carrying the identity token
    pub token_cookie_name: String,
    /// Token lifetime (24 hours)
    pub token_ttl: Duration,
    /// Issuer tag
    pub token_issuer: String,
    /// Token signing secret
    pub token_secret: TokenSecret,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Deadline applied to every ledger call
    pub operation_timeout: Duration,
}

impl ShopConfig {
    /// Create config around an explicit signing secret
    pub fn new(token_secret: TokenSecret) -> Self {
        Self {
            token_cookie_name: DEFAULT_TOKEN_COOKIE.to_string(),
            token_ttl: DEFAULT_TOKEN_TTL,
            token_issuer: TOKEN_ISSUER.to_string(),
            token_secret,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Create config for development (random secret, insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::new(TokenSecret::random())
        }
    }

    /// Build the token issuer/verifier for this configuration
    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(&self.token_secret, self.token_issuer.clone(), self.token_ttl)
    }

    /// Cookie settings for the identity token
    pub fn token_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.token_cookie_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age: Some(self.token_ttl),
            ..CookieConfig::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
