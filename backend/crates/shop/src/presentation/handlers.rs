//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::response::{IntoResponse, Response};
use http::{StatusCode, header};

use crate::application::config::ShopConfig;
use crate::application::{
    AuthenticateInput, AuthenticateUseCase, AuthorizationGate, BuyItemUseCase, GetInfoUseCase,
    Identity, SendCoinInput, SendCoinUseCase,
};
use crate::domain::repository::LedgerRepository;
use crate::error::ShopResult;
use crate::presentation::dto::{AuthRequest, AuthResponse, InfoResponse, SendCoinRequest};

/// Shared state for shop handlers
#[derive(Clone)]
pub struct ShopAppState<R>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<ShopConfig>,
    pub gate: AuthorizationGate,
}

impl<R> ShopAppState<R>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: ShopConfig) -> Self {
        let gate = AuthorizationGate::from_config(&config);
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            gate,
        }
    }
}

// ============================================================================
// Authenticate
// ============================================================================

/// POST /api/auth
pub async fn authenticate<R>(
    State(state): State<ShopAppState<R>>,
    Json(req): Json<AuthRequest>,
) -> ShopResult<Response>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(AuthenticateInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    let cookie = state.config.token_cookie().set_cookie_header(&output.token);
    let mut response = (
        StatusCode::OK,
        Json(AuthResponse {
            token: output.token,
        }),
    )
        .into_response();

    if let Some(cookie) = cookie {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }

    Ok(response)
}

// ============================================================================
// Account operations (behind require_identity)
// ============================================================================

/// GET /api/info
pub async fn get_info<R>(
    State(state): State<ShopAppState<R>>,
    Extension(identity): Extension<Identity>,
) -> ShopResult<Json<InfoResponse>>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetInfoUseCase::new(state.repo.clone(), state.config.clone());
    let info = use_case.execute(identity).await?;

    Ok(Json(info.into()))
}

/// GET /api/buy/{item}
pub async fn buy_item<R>(
    State(state): State<ShopAppState<R>>,
    Extension(identity): Extension<Identity>,
    Path(item): Path<String>,
) -> ShopResult<StatusCode>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let use_case = BuyItemUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(identity, &item).await?;

    Ok(StatusCode::OK)
}

/// POST /api/sendCoin
pub async fn send_coin<R>(
    State(state): State<ShopAppState<R>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<SendCoinRequest>,
) -> ShopResult<StatusCode>
where
    R: LedgerRepository + Clone + Send + Sync + 'static,
{
    let use_case = SendCoinUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(
            identity,
            SendCoinInput {
                to_user: req.to_user,
                amount: req.amount,
            },
        )
        .await?;

    Ok(StatusCode::OK)
}
