use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use reqwest::StatusCode;

use crate::entities::category::Category;
use crate::entities::dispute::Dispute;
use crate::entities::kyc_request::KycRequest;
use crate::entities::money_movement::{Deposit, WithdrawalRequest};
use crate::entities::platform_settings::PlatformSettings;
use crate::entities::task::Task;
use crate::entities::user::User;
use crate::middleware::auth_with_admin_access::AuthWithAdminAccess;
use crate::middleware::error::{CtxError, CtxResult};
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::models::view::admin::AdminStats;
use crate::services::moderation_service::{
    CategoryInput, DisputeInput, KycReviewInput, ModerationService, ReviewInput,
    TaskActionInput, UserSearchQuery, UserStatusInput,
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/admin/stats", get(get_stats))
        .route("/api/admin/users", get(get_users))
        .route("/api/admin/users/:user_id/status", post(set_user_status))
        .route("/api/admin/tasks", get(get_tasks))
        .route("/api/admin/tasks/:task_id/action", post(task_action))
        .route("/api/admin/deposits", get(get_deposits))
        .route("/api/admin/deposits/:deposit_id/status", post(set_deposit_status))
        .route("/api/admin/withdrawals", get(get_withdrawals))
        .route(
            "/api/admin/withdrawals/:withdrawal_id/status",
            post(set_withdrawal_status),
        )
        .route("/api/admin/disputes", get(get_disputes))
        .route("/api/admin/disputes/:dispute_id/status", post(set_dispute_status))
        .route("/api/admin/kyc", get(get_kyc_requests))
        .route("/api/admin/kyc/:kyc_id/status", post(set_kyc_status))
        .route("/api/admin/categories", get(get_categories).post(add_category))
        .route("/api/admin/categories/:category_id", delete(delete_category))
        .route("/api/admin/settings", get(get_settings).post(update_settings))
}

async fn get_stats(
    _auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
) -> Json<AdminStats> {
    Json(ModerationService::new(&state).stats().await)
}

async fn get_users(
    _auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
    Query(query): Query<UserSearchQuery>,
) -> Json<Vec<User>> {
    Json(
        ModerationService::new(&state)
            .users(query.search.as_deref())
            .await,
    )
}

async fn set_user_status(
    Path(user_id): Path<String>,
    auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<UserStatusInput>,
) -> CtxResult<Json<User>> {
    let user = ModerationService::new(&state)
        .set_user_status(&user_id, input.status)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(user))
}

async fn get_tasks(
    _auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
) -> Json<Vec<Task>> {
    Json(ModerationService::new(&state).tasks().await)
}

async fn task_action(
    Path(task_id): Path<String>,
    auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<TaskActionInput>,
) -> CtxResult<Response> {
    let task = ModerationService::new(&state)
        .apply_task_action(&task_id, input.action)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(match task {
        Some(task) => Json(task).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

async fn get_deposits(
    _auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
) -> Json<Vec<Deposit>> {
    Json(ModerationService::new(&state).deposits().await)
}

async fn set_deposit_status(
    Path(deposit_id): Path<String>,
    auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<ReviewInput>,
) -> CtxResult<Json<Deposit>> {
    let deposit = ModerationService::new(&state)
        .set_deposit_status(&deposit_id, input.status)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(deposit))
}

async fn get_withdrawals(
    _auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
) -> Json<Vec<WithdrawalRequest>> {
    Json(ModerationService::new(&state).withdrawals().await)
}

async fn set_withdrawal_status(
    Path(withdrawal_id): Path<String>,
    auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<ReviewInput>,
) -> CtxResult<Json<WithdrawalRequest>> {
    let request = ModerationService::new(&state)
        .set_withdrawal_status(&withdrawal_id, input.status)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(request))
}

async fn get_disputes(
    _auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
) -> Json<Vec<Dispute>> {
    Json(ModerationService::new(&state).disputes().await)
}

async fn set_dispute_status(
    Path(dispute_id): Path<String>,
    auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<DisputeInput>,
) -> CtxResult<Json<Dispute>> {
    let dispute = ModerationService::new(&state)
        .set_dispute_status(&dispute_id, input.status)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(dispute))
}

async fn get_kyc_requests(
    _auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
) -> Json<Vec<KycRequest>> {
    Json(ModerationService::new(&state).kyc_requests().await)
}

async fn set_kyc_status(
    Path(kyc_id): Path<String>,
    auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<KycReviewInput>,
) -> CtxResult<Json<KycRequest>> {
    let request = ModerationService::new(&state)
        .set_kyc_status(&kyc_id, input.status)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(request))
}

async fn get_categories(
    _auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
) -> Json<Vec<Category>> {
    Json(ModerationService::new(&state).categories().await)
}

async fn add_category(
    auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<CategoryInput>,
) -> CtxResult<Response> {
    let category = ModerationService::new(&state)
        .add_category(input)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok((StatusCode::CREATED, Json(category)).into_response())
}

async fn delete_category(
    Path(category_id): Path<String>,
    auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<StatusCode> {
    ModerationService::new(&state)
        .delete_category(&category_id)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_settings(
    _auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
) -> Json<PlatformSettings> {
    Json(ModerationService::new(&state).settings().await)
}

async fn update_settings(
    auth_data: AuthWithAdminAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(settings): JsonOrFormValidated<PlatformSettings>,
) -> CtxResult<Json<PlatformSettings>> {
    let settings = ModerationService::new(&state)
        .update_settings(settings)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(settings))
}
