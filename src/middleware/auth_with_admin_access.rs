use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{
    entities::user::UserRole,
    middleware::{
        error::{AppError, CtxError},
        mw_ctx::CtxState,
        utils::cookie_utils::session_token,
    },
    models::session::Session,
    utils::jwt::TokenType,
};

use super::ctx::Ctx;

/// Session opened through the admin login.
#[derive(Debug)]
pub struct AuthWithAdminAccess {
    pub session: Session,
    pub ctx: Ctx,
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for AuthWithAdminAccess {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers)
            .ok_or(AppError::AuthFailNoJwtCookie)?;
        let claims = state
            .jwt
            .decode_by_type(&token, TokenType::Admin)
            .map_err(|source| AppError::AuthFailJwtInvalid { source })?;

        let ctx = Ctx::new(Ok(claims.sub.clone()));
        let session = state
            .session(&claims.sub)
            .await
            .map_err(|e| ctx.to_ctx_error(e))?;
        session
            .user
            .require_role(UserRole::Admin)
            .map_err(|e| ctx.to_ctx_error(e))?;

        Ok(AuthWithAdminAccess { session, ctx })
    }
}
