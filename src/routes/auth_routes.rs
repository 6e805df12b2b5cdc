use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart};
use reqwest::StatusCode;
use serde_json::json;
use tempfile::NamedTempFile;
use tower_cookies::Cookies;
use validator::Validate;

use crate::{
    middleware::{
        auth_with_login_access::AuthWithLoginAccess,
        ctx::Ctx,
        error::{AppError, CtxError, CtxResult},
        mw_ctx::CtxState,
        utils::{
            cookie_utils::{clear_session_cookie, issue_session_cookie},
            extractor_utils::JsonOrFormValidated,
        },
    },
    models::{
        session::Session,
        view::session::{MessageView, SessionView},
    },
    services::session_service::{
        AdminLoginInput, BalanceDeltaInput, LoginInput, RegisterInput, SessionService,
    },
};

pub fn routes(is_development: bool) -> Router<Arc<CtxState>> {
    let mut router: Router<Arc<CtxState>> = Router::new()
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/admin/login", post(admin_login))
        .route("/api/logout", post(logout))
        .route("/api/session", get(current_session))
        .route("/api/session/switch_role", post(switch_role))
        .route(
            "/api/kyc",
            post(submit_kyc).layer(DefaultBodyLimit::max(1024 * 1024 * 8)),
        );

    if is_development {
        router = router.route("/api/session/balance", post(update_balance));
    }

    router
}

fn signed_in(cookies: &Cookies, session: &Session, token: String) -> Response {
    issue_session_cookie(cookies, &token);
    (
        StatusCode::OK,
        Json(json!({ "token": token, "session": SessionView::from(session) })),
    )
        .into_response()
}

async fn login(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    cookies: Cookies,
    JsonOrFormValidated(input): JsonOrFormValidated<LoginInput>,
) -> CtxResult<Response> {
    let (session, token) = SessionService::new(&state)
        .login(input)
        .await
        .map_err(CtxError::from(&ctx))?;
    Ok(signed_in(&cookies, &session, token))
}

async fn register(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    cookies: Cookies,
    JsonOrFormValidated(input): JsonOrFormValidated<RegisterInput>,
) -> CtxResult<Response> {
    let (session, token) = SessionService::new(&state)
        .register(input)
        .await
        .map_err(CtxError::from(&ctx))?;
    Ok(signed_in(&cookies, &session, token))
}

async fn admin_login(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    cookies: Cookies,
    JsonOrFormValidated(input): JsonOrFormValidated<AdminLoginInput>,
) -> CtxResult<Response> {
    let (session, token) = SessionService::new(&state)
        .admin_login(input)
        .await
        .map_err(CtxError::from(&ctx))?;
    Ok(signed_in(&cookies, &session, token))
}

async fn logout(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
    cookies: Cookies,
) -> CtxResult<Response> {
    SessionService::new(&state)
        .logout(auth_data.session_id())
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    clear_session_cookie(&cookies);
    Ok(Json(MessageView::new("Logged out")).into_response())
}

async fn current_session(auth_data: AuthWithLoginAccess) -> Json<SessionView> {
    Json(SessionView::from(&auth_data.session))
}

async fn switch_role(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<SessionView>> {
    let session = SessionService::new(&state)
        .switch_role(auth_data.session_id())
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(SessionView::from(&session)))
}

async fn update_balance(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<BalanceDeltaInput>,
) -> CtxResult<Json<SessionView>> {
    let session = SessionService::new(&state)
        .update_balance(auth_data.session_id(), input.delta)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(SessionView::from(&session)))
}

#[derive(Validate, TryFromMultipart)]
pub struct KycInput {
    #[validate(length(min = 1, message = "Document type is required"))]
    pub document_type: String,
    #[form_data(limit = "unlimited")]
    pub document: Option<FieldData<NamedTempFile>>,
}

async fn submit_kyc(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
    TypedMultipart(input): TypedMultipart<KycInput>,
) -> CtxResult<Json<SessionView>> {
    input
        .validate()
        .map_err(|e| auth_data.ctx.to_ctx_error(e.into()))?;
    let document = input
        .document
        .and_then(|file| file.metadata.file_name)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            auth_data
                .ctx
                .to_ctx_error(AppError::validation("Please upload your ID document."))
        })?;

    let session = SessionService::new(&state)
        .submit_kyc(&auth_data.session, &input.document_type, &document)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(SessionView::from(&session)))
}
