//! Identity Middleware
//!
//! Runs the authorization gate in front of the account routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::repository::LedgerRepository;
use crate::error::ShopError;
use crate::presentation::handlers::ShopAppState;

/// Reject the request unless it carries a valid identity token.
///
/// The token is read from the configured cookie, falling back to
/// `Authorization: Bearer`. On success the resolved
/// [`Identity`](crate::application::Identity) is stored in the request
/// extensions for the handler.
pub async fn require_identity<R>(
    State(state): State<ShopAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ShopError>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_token(req.headers(), &state.config.token_cookie_name);
    let identity = state.gate.authorize(token.as_deref())?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
