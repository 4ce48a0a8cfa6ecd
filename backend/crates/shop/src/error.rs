//! Shop Error Types
//!
//! This module provides shop-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::coin_amount::MIN_COIN_AMOUNT;
use crate::domain::value_object::inventory::InventoryError;
use crate::domain::value_object::user_name::{USER_NAME_MAX_LENGTH, USER_NAME_MIN_LENGTH};
use crate::domain::value_object::user_password::{PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH};

/// Shop-specific result type alias
pub type ShopResult<T> = Result<T, ShopError>;

/// Shop-specific error variants
#[derive(Debug, Error)]
pub enum ShopError {
    /// User name outside the accepted bounds
    #[error(
        "username is invalid: length min {} max {}",
        USER_NAME_MIN_LENGTH,
        USER_NAME_MAX_LENGTH
    )]
    InvalidUserName,

    /// Password outside the accepted bounds
    #[error(
        "password is invalid: length min {} max {}",
        PASSWORD_MIN_LENGTH,
        PASSWORD_MAX_LENGTH
    )]
    InvalidPassword,

    /// Transfer amount below the minimum
    #[error("coin amount is invalid: min {}", MIN_COIN_AMOUNT)]
    InvalidCoinAmount,

    /// Item id is not a positive integer
    #[error("item id is invalid")]
    InvalidItemId,

    /// Missing, malformed or expired identity token
    #[error("unauthorized")]
    Unauthorized,

    /// Password does not match the stored hash
    #[error("incorrect password")]
    PasswordMismatch,

    /// Recipient account does not exist
    #[error("no such user")]
    NoSuchAccount,

    /// Catalog item does not exist
    #[error("no such item")]
    NoSuchItem,

    /// Balance would go negative
    #[error("not enough coins")]
    InsufficientFunds,

    /// Operation exceeded its deadline
    #[error("request timed out")]
    Timeout,

    /// Persisted inventory could not be decoded
    #[error("malformed inventory: {0}")]
    MalformedInventory(#[from] InventoryError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShopError::InvalidUserName
            | ShopError::InvalidPassword
            | ShopError::InvalidCoinAmount
            | ShopError::InvalidItemId => ErrorKind::Validation,
            ShopError::Unauthorized | ShopError::PasswordMismatch => ErrorKind::Unauthorized,
            ShopError::NoSuchAccount | ShopError::NoSuchItem => ErrorKind::NotFound,
            ShopError::InsufficientFunds => ErrorKind::Conflict,
            ShopError::Timeout => ErrorKind::Timeout,
            ShopError::Database(e) => classify_sqlx(e).0,
            ShopError::MalformedInventory(_) | ShopError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ShopError::Database(e) => {
                tracing::error!(error = %e, "Shop database error");
            }
            ShopError::Internal(msg) => {
                tracing::error!(message = %msg, "Shop internal error");
            }
            ShopError::MalformedInventory(e) => {
                tracing::error!(error = %e, "Stored inventory could not be decoded");
            }
            ShopError::Timeout => {
                tracing::error!("Shop operation exceeded its deadline");
            }
            ShopError::PasswordMismatch => {
                tracing::warn!("Invalid login attempt");
            }
            ShopError::Unauthorized => {
                tracing::warn!("Request without a valid identity token");
            }
            _ => {
                tracing::debug!(error = %self, "Shop error");
            }
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
