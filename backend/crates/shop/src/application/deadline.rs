//! Operation Deadlines
//!
//! Bounds every store call by the configured operation timeout. When the
//! deadline fires the in-flight future is dropped; the ledger store's
//! transaction guard then rolls back. No retries are attempted.

use std::future::Future;
use std::time::Duration;

use crate::error::{ShopError, ShopResult};

/// Run `operation` under `limit`, failing with [`ShopError::Timeout`] on expiry
pub async fn with_deadline<T, F>(limit: Duration, operation: F) -> ShopResult<T>
where
    F: Future<Output = ShopResult<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(limit_ms = limit.as_millis() as u64, "Operation deadline exceeded");
            Err(ShopError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let result = with_deadline(Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: ShopResult<()> =
            with_deadline(Duration::from_secs(1), async { Err(ShopError::NoSuchItem) }).await;
        assert!(matches!(result, Err(ShopError::NoSuchItem)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_deadline() {
        let result: ShopResult<()> = with_deadline(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(ShopError::Timeout)));
    }
}
