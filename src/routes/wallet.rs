use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::entities::transaction::Transaction;
use crate::middleware::auth_with_login_access::AuthWithLoginAccess;
use crate::middleware::error::{CtxError, CtxResult};
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::models::view::wallet::{BalanceView, DepositView, WithdrawalView};
use crate::services::wallet_service::{DepositInput, HistoryQuery, WalletService, WithdrawInput};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/wallet/balance", get(get_user_balance))
        .route("/api/wallet/history", get(get_wallet_history))
        .route("/api/wallet/deposit", post(deposit))
        .route("/api/wallet/withdraw", post(withdraw))
}

async fn get_user_balance(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<BalanceView>> {
    let balance = WalletService::new(&state)
        .balance(auth_data.session_id())
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(balance))
}

async fn get_wallet_history(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
    Query(query): Query<HistoryQuery>,
) -> CtxResult<Json<Vec<Transaction>>> {
    let history = WalletService::new(&state)
        .history(auth_data.session_id(), query.r#type)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(history))
}

async fn deposit(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<DepositInput>,
) -> CtxResult<Json<DepositView>> {
    let view = WalletService::new(&state)
        .deposit(auth_data.session_id(), input.amount)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(view))
}

async fn withdraw(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<WithdrawInput>,
) -> CtxResult<Json<WithdrawalView>> {
    let view = WalletService::new(&state)
        .withdraw(auth_data.session_id(), input)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(view))
}
