use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::routing::post;
use axum::{Json, Router};
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use validator::Validate;

use crate::entities::user::UserRole;
use crate::middleware::auth_with_login_access::AuthWithLoginAccess;
use crate::middleware::error::{AppError, CtxError, CtxResult};
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::services::ai_service::{AiService, FraudAssessment, ScreenshotAssessment};

const DEFAULT_IMAGE_MIME: &str = "image/png";

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/ai/rewrite", post(rewrite))
        .route("/api/ai/fraud-risk", post(fraud_risk))
        .route(
            "/api/ai/screenshot-check",
            post(screenshot_check).layer(DefaultBodyLimit::max(1024 * 1024 * 8)),
        )
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RewriteInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RewriteView {
    pub description: String,
}

async fn rewrite(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<RewriteInput>,
) -> CtxResult<Json<RewriteView>> {
    auth_data
        .session
        .user
        .require_role(UserRole::Advertiser)
        .map_err(CtxError::from(&auth_data.ctx))?;
    if input.title.trim().is_empty() || input.description.trim().is_empty() {
        return Err(auth_data.ctx.to_ctx_error(AppError::validation(
            "Please fill in a title and rough description first.",
        )));
    }
    let description = AiService::new(&state)
        .rewrite_description(&input.title, &input.description)
        .await;
    Ok(Json(RewriteView { description }))
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct FraudRiskInput {
    #[validate(length(min = 1))]
    pub proof_text: String,
}

async fn fraud_risk(
    _auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<FraudRiskInput>,
) -> Json<FraudAssessment> {
    Json(AiService::new(&state).detect_fraud_risk(&input.proof_text).await)
}

#[derive(TryFromMultipart)]
pub struct ScreenshotCheckForm {
    #[form_data(limit = "unlimited")]
    pub image: FieldData<NamedTempFile>,
    pub requirements: String,
}

async fn screenshot_check(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
    TypedMultipart(form): TypedMultipart<ScreenshotCheckForm>,
) -> CtxResult<Json<ScreenshotAssessment>> {
    let mime_type = form
        .image
        .metadata
        .content_type
        .clone()
        .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());
    let bytes = tokio::fs::read(form.image.contents.path())
        .await
        .map_err(|e| auth_data.ctx.to_ctx_error(AppError::from(e)))?;
    let assessment = AiService::new(&state)
        .analyze_screenshot(STANDARD.encode(bytes), &mime_type, &form.requirements)
        .await;
    Ok(Json(assessment))
}
