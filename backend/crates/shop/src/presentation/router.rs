//! Shop Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::config::ShopConfig;
use crate::domain::repository::LedgerRepository;
use crate::infra::postgres::PgLedgerRepository;
use crate::presentation::handlers::{self, ShopAppState};
use crate::presentation::middleware::require_identity;

/// Create the shop router with the PostgreSQL ledger store
pub fn shop_router(repo: PgLedgerRepository, config: ShopConfig) -> Router {
    shop_router_generic(repo, config)
}

/// Create a shop router for any ledger store implementation
pub fn shop_router_generic<R>(repo: R, config: ShopConfig) -> Router
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let state = ShopAppState::new(repo, config);

    let protected = Router::new()
        .route("/info", get(handlers::get_info::<R>))
        .route("/buy/{item}", get(handlers::buy_item::<R>))
        .route("/sendCoin", post(handlers::send_coin::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_identity::<R>,
        ));

    Router::new()
        .route("/auth", post(handlers::authenticate::<R>))
        .merge(protected)
        .with_state(state)
}
