//! Identity Token Issuing and Verification
//!
//! HS256-signed, time-bound assertions of "who is calling":
//! - Claims: subject, issuer tag, issued-at, expires-at
//! - Signature keyed by a process-wide secret
//! - Expiry checked with zero leeway
//!
//! Every verification failure collapses into [`TokenError::Invalid`] so that a
//! malformed, tampered or expired token cannot be told apart by the caller.

use std::fmt;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Minimum secret length accepted for HS256 keys
pub const MIN_SECRET_LENGTH: usize = 32;

// ============================================================================
// Error Types
// ============================================================================

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature, structure, issuer or expiry check failed
    #[error("Invalid token")]
    Invalid,

    /// Signing backend failure
    #[error("Token issuance failed: {0}")]
    IssuanceFailed(String),
}

/// Secret configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenSecretError {
    #[error("Token secret is not valid base64")]
    InvalidEncoding,

    #[error("Token secret must be at least {min} bytes (got {actual})")]
    TooShort { min: usize, actual: usize },
}

// ============================================================================
// Secret
// ============================================================================

/// Shared signing secret (zeroized on drop)
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct TokenSecret(Vec<u8>);

impl TokenSecret {
    /// Wrap raw key bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, TokenSecretError> {
        let bytes = bytes.into();
        if bytes.len() < MIN_SECRET_LENGTH {
            return Err(TokenSecretError::TooShort {
                min: MIN_SECRET_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    /// Decode a standard base64 secret (e.g. from the environment)
    pub fn from_base64(encoded: &str) -> Result<Self, TokenSecretError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| TokenSecretError::InvalidEncoding)?;
        Self::from_bytes(bytes)
    }

    /// Generate a random 64-byte secret (development only)
    pub fn random() -> Self {
        let mut bytes = vec![0u8; 64];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TokenSecret").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Claims
// ============================================================================

/// Token claim set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (account identifier)
    pub sub: String,
    /// Issuer tag
    pub iss: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

// ============================================================================
// Issuer / Verifier
// ============================================================================

/// Issues and verifies identity tokens
///
/// ## Examples
/// ```rust
/// use platform::token::{TokenIssuer, TokenSecret, DEFAULT_TOKEN_TTL};
///
/// let issuer = TokenIssuer::new(&TokenSecret::random(), "merch-shop", DEFAULT_TOKEN_TTL);
/// let token = issuer.issue("42").unwrap();
/// assert_eq!(issuer.verify(&token).unwrap().sub, "42");
/// ```
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &TokenSecret, issuer: impl Into<String>, ttl: Duration) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["sub", "iss", "iat", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer,
            ttl,
        }
    }

    /// Token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid from now
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if it had been issued at `issued_at`
    pub fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|e| TokenError::IssuanceFailed(e.to_string()))?;

        let claims = TokenClaims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::IssuanceFailed(e.to_string()))
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
