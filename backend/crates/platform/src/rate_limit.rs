//! Rate Limiting Infrastructure
//!
//! Token-bucket rate limiting behind an injectable store.
//! Each key owns a bucket of `max_requests` tokens refilled continuously
//! over `window`; a request consumes one token or is rejected.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window (bucket capacity)
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 1000,
            window: Duration::from_secs(1),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Requests per second shorthand
    pub fn per_second(max_requests: u32) -> Self {
        Self::new(max_requests, 1)
    }

    fn refill_per_sec(&self) -> f64 {
        let window = self.window.as_secs_f64();
        if window <= 0.0 {
            f64::INFINITY
        } else {
            f64::from(self.max_requests) / window
        }
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    /// Milliseconds until at least one token is available again
    pub reset_after_ms: i64,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Consume one token for `key` if available
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    refilled_at: Instant,
}

/// Process-local token-bucket store
///
/// Buckets that have refilled completely are evicted once the map grows past
/// `max_keys`.
#[derive(Debug)]
pub struct InMemoryRateLimitStore {
    buckets: Mutex<HashMap<String, Bucket>>,
    max_keys: usize,
}

impl Default for InMemoryRateLimitStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl InMemoryRateLimitStore {
    pub fn new(max_keys: usize) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            max_keys,
        }
    }

    fn take(
        buckets: &mut HashMap<String, Bucket>,
        key: &str,
        config: &RateLimitConfig,
        now: Instant,
    ) -> RateLimitResult {
        let capacity = f64::from(config.max_requests);
        let rate = config.refill_per_sec();

        let bucket = buckets.entry(key.to_string()).or_insert(Bucket {
            tokens: capacity,
            refilled_at: now,
        });

        let elapsed = now.saturating_duration_since(bucket.refilled_at).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * rate).min(capacity);
        bucket.refilled_at = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            RateLimitResult {
                allowed: true,
                remaining: bucket.tokens.floor() as u32,
                reset_after_ms: 0,
            }
        } else {
            let wait_secs = if rate.is_finite() && rate > 0.0 {
                (1.0 - bucket.tokens) / rate
            } else {
                0.0
            };
            RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_after_ms: (wait_secs * 1000.0).ceil() as i64,
            }
        }
    }

    fn evict_full(buckets: &mut HashMap<String, Bucket>, config: &RateLimitConfig, now: Instant) {
        let capacity = f64::from(config.max_requests);
        let rate = config.refill_per_sec();
        buckets.retain(|_, bucket| {
            let elapsed = now.saturating_duration_since(bucket.refilled_at).as_secs_f64();
            bucket.tokens + elapsed * rate < capacity
        });
    }

    async fn check_at(&self, key: &str, config: &RateLimitConfig, now: Instant) -> RateLimitResult {
        let mut buckets = self.buckets.lock().await;
        if buckets.len() >= self.max_keys && !buckets.contains_key(key) {
            Self::evict_full(&mut buckets, config, now);
        }
        Self::take(&mut buckets, key, config, now)
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.check_at(key, config, Instant::now()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bucket_allows_capacity_then_rejects() {
        let store = InMemoryRateLimitStore::default();
        let config = RateLimitConfig::per_second(3);
        let now = Instant::now();

        for expected_remaining in [2, 1, 0] {
            let result = store.check_at("1.2.3.4", &config, now).await;
            assert!(result.allowed);
            assert_eq!(result.remaining, expected_remaining);
        }

        let result = store.check_at("1.2.3.4", &config, now).await;
        assert!(!result.allowed);
        assert!(result.reset_after_ms > 0);
    }

    #[tokio::test]
    async fn test_bucket_refills_over_time() {
        let store = InMemoryRateLimitStore::default();
        let config = RateLimitConfig::per_second(2);
        let start = Instant::now();

        assert!(store.check_at("k", &config, start).await.allowed);
        assert!(store.check_at("k", &config, start).await.allowed);
        assert!(!store.check_at("k", &config, start).await.allowed);

        let later = start + Duration::from_millis(600);
        assert!(store.check_at("k", &config, later).await.allowed);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = InMemoryRateLimitStore::default();
        let config = RateLimitConfig::per_second(1);
        let now = Instant::now();

        assert!(store.check_at("a", &config, now).await.allowed);
        assert!(!store.check_at("a", &config, now).await.allowed);
        assert!(store.check_at("b", &config, now).await.allowed);
    }

    #[tokio::test]
    async fn test_full_buckets_evicted_at_capacity() {
        let store = InMemoryRateLimitStore::new(2);
        let config = RateLimitConfig::per_second(5);
        let start = Instant::now();

        store.check_at("a", &config, start).await;
        store.check_at("b", &config, start).await;

        let later = start + Duration::from_secs(2);
        store.check_at("c", &config, later).await;

        let buckets = store.buckets.lock().await;
        assert_eq!(buckets.len(), 1);
        assert!(buckets.contains_key("c"));
    }

    #[tokio::test]
    async fn test_store_trait() {
        let store = InMemoryRateLimitStore::default();
        let result = RateLimitStore::check_and_increment(&store, "x", &RateLimitConfig::default())
            .await
            .unwrap();
        assert!(result.allowed);
    }
}
