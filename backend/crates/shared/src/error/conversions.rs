//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

#[cfg(any(feature = "sqlx", feature = "axum"))]
use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a database error without consuming it
///
/// Returns the error kind plus a log message that carries no query text.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            (ErrorKind::Unavailable, "Database connection pool exhausted")
        }
        sqlx::Error::Io(_) => (ErrorKind::Unavailable, "Database connection error"),
        // PostgreSQL error codes
        // https://www.postgresql.org/docs/current/errcodes-appendix.html
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // Class 53: Insufficient Resources
            Some("53000" | "53100" | "53200" | "53300") => {
                (ErrorKind::Unavailable, "Database resource exhausted")
            }
            // Class 57: Operator Intervention
            Some("57P01" | "57P02" | "57P03") => (ErrorKind::Unavailable, "Database unavailable"),
            // query_canceled: statement_timeout fired
            Some("57014") => (ErrorKind::Timeout, "Database statement timed out"),
            _ => (ErrorKind::Internal, "Database error"),
        },
        _ => (ErrorKind::Internal, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = classify_sqlx(&err);
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        // `errors` mirrors `detail` for clients of the legacy body shape.
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.public_message(),
            "errors": self.public_message(),
        });

        (status, Json(body)).into_response()
    }
}
