use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::middleware::auth_with_login_access::AuthWithLoginAccess;
use crate::middleware::error::{CtxError, CtxResult};
use crate::middleware::mw_ctx::CtxState;
use crate::models::view::session::NotificationsView;
use crate::services::session_service::SessionService;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/notifications", get(get_notifications))
        .route("/api/notifications/read", post(read_all))
        .route("/api/notifications/:notification_id/read", post(read))
}

async fn get_notifications(auth_data: AuthWithLoginAccess) -> Json<NotificationsView> {
    Json(NotificationsView::from(&auth_data.session))
}

async fn read(
    Path(notification_id): Path<String>,
    State(state): State<Arc<CtxState>>,
    auth_data: AuthWithLoginAccess,
) -> CtxResult<Json<NotificationsView>> {
    let session = SessionService::new(&state)
        .mark_notification_read(auth_data.session_id(), &notification_id)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(NotificationsView::from(&session)))
}

async fn read_all(
    State(state): State<Arc<CtxState>>,
    auth_data: AuthWithLoginAccess,
) -> CtxResult<Json<NotificationsView>> {
    let session = SessionService::new(&state)
        .mark_all_notifications_read(auth_data.session_id())
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(NotificationsView::from(&session)))
}
