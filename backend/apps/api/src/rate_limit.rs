//! Per-client rate limiting middleware

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::client::client_key;
use platform::rate_limit::{RateLimitConfig, RateLimitStore};

/// Limiter state injected into the middleware
pub struct RateLimitState<S> {
    pub store: Arc<S>,
    pub config: RateLimitConfig,
}

impl<S> Clone for RateLimitState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> RateLimitState<S> {
    pub fn new(store: S, config: RateLimitConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }
}

/// Consume one token for the calling client or reject with 429.
///
/// A failing limiter backend lets the request through.
pub async fn limit_requests<S>(
    State(state): State<RateLimitState<S>>,
    req: Request,
    next: Next,
) -> Response
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let key = client_key(req.headers(), direct_ip);

    match state.store.check_and_increment(&key, &state.config).await {
        Ok(result) if result.allowed => next.run(req).await,
        Ok(result) => {
            tracing::warn!(
                client = %key,
                reset_after_ms = result.reset_after_ms,
                "Rate limit exceeded"
            );
            AppError::too_many_requests("too many requests").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Rate limiter failed, allowing request");
            next.run(req).await
        }
    }
}
