use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{
    entities::user::UserStatus,
    middleware::{
        error::{AppError, CtxError},
        mw_ctx::CtxState,
    },
    models::session::Session,
};

use super::ctx::Ctx;

/// Resolves the caller's live session or rejects the request.
#[derive(Debug)]
pub struct AuthWithLoginAccess {
    pub session: Session,
    pub ctx: Ctx,
}

impl AuthWithLoginAccess {
    pub fn session_id(&self) -> &str {
        &self.session.id
    }

    pub fn user_id(&self) -> &str {
        &self.session.user.id
    }
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for AuthWithLoginAccess {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let ctx = match Ctx::from_request_parts(parts, state).await {
            Ok(ctx) => ctx,
            Err(never) => match never {},
        };
        let session_id = ctx.session_id()?;
        let session = state
            .session(&session_id)
            .await
            .map_err(|e| ctx.to_ctx_error(e))?;

        if state.board.read().await.user_status(&session.user.id) == Some(UserStatus::Banned) {
            return Err(ctx.to_ctx_error(AppError::AccountBanned));
        }

        Ok(AuthWithLoginAccess { session, ctx })
    }
}

