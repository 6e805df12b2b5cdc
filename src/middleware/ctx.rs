use std::convert::Infallible;
use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use super::error::{AppError, AppResult, CtxError, CtxResult};
use super::mw_ctx::CtxState;
use super::utils::cookie_utils::session_token;

#[derive(Clone, Debug)]
pub struct Ctx {
    result_session_id: AppResult<String>,
    req_id: Uuid,
}

impl Ctx {
    pub fn new(result_session_id: AppResult<String>) -> Self {
        Self {
            result_session_id,
            req_id: Uuid::new_v4(),
        }
    }

    pub fn req_id(&self) -> Uuid {
        self.req_id
    }

    pub fn session_id(&self) -> CtxResult<String> {
        self.result_session_id
            .clone()
            .map_err(|error| self.to_ctx_error(error))
    }

    pub fn to_ctx_error(&self, error: AppError) -> CtxError {
        CtxError {
            error,
            req_id: self.req_id,
        }
    }
}

/// Request context for routes that work with or without a session.
#[async_trait]
impl FromRequestParts<Arc<CtxState>> for Ctx {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let result_session_id = match session_token(&parts.headers) {
            Some(token) => state
                .jwt
                .decode(&token)
                .map(|claims| claims.sub)
                .map_err(|source| AppError::AuthFailJwtInvalid { source }),
            None => Err(AppError::AuthFailNoJwtCookie),
        };
        Ok(Ctx::new(result_session_id))
    }
}
