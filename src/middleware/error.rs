use std::fmt;

use axum::{http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use super::ctx::Ctx;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CtxError {
    pub error: AppError,
    pub req_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Generic { description: String },
    Validation { message: String },
    AuthenticationFail,
    AdminAuthenticationFail,
    AuthorizationFail { required: String },
    AuthFailNoJwtCookie,
    AuthFailJwtInvalid { source: String },
    SessionNotFound,
    AccountBanned,
    EntityFailIdNotFound { ident: String },
    Serde { source: String },
    Io { source: String },
}

/// Error carrying the request id reported back to the client.
pub type CtxResult<T> = core::result::Result<T, CtxError>;
/// Any error raised before a request id is attached.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(ident: impl Into<String>) -> Self {
        Self::EntityFailIdNotFound {
            ident: ident.into(),
        }
    }
}

impl CtxError {
    pub fn from<T: Into<AppError>>(ctx: &Ctx) -> impl FnOnce(T) -> CtxError + '_ {
        |err| CtxError {
            req_id: ctx.req_id(),
            error: err.into(),
        }
    }
}

impl From<AppError> for CtxError {
    fn from(value: AppError) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value,
        }
    }
}

const INTERNAL: &str = "Internal error";

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic { description } => write!(f, "{description}"),
            Self::Validation { message } => write!(f, "{message}"),
            Self::AuthenticationFail => write!(f, "Authentication failed"),
            Self::AdminAuthenticationFail => {
                write!(f, "Access Denied: Invalid administrative credentials.")
            }
            Self::AuthorizationFail { required } => write!(f, "Not authorized: {required}"),
            Self::AuthFailNoJwtCookie => write!(f, "You are not logged in"),
            Self::AuthFailJwtInvalid { .. } => write!(f, "The provided JWT token is not valid"),
            Self::SessionNotFound => write!(f, "Session expired or logged out"),
            Self::AccountBanned => write!(f, "Account is banned"),
            Self::EntityFailIdNotFound { ident } => write!(f, "Record id= {ident} not found"),
            Self::Serde { source } => write!(f, "Serde error - {source}"),
            Self::Io { .. } => write!(f, "{INTERNAL}"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponseBody {
    error: String,
    req_id: String,
}

impl ErrorResponseBody {
    pub fn new(error: String, req_id: Option<String>) -> Self {
        ErrorResponseBody {
            error,
            req_id: req_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }

    pub fn get_err(&self) -> String {
        self.error.clone()
    }
}

impl IntoResponse for CtxError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self.error {
            AppError::EntityFailIdNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Generic { .. } | AppError::Validation { .. } | AppError::Serde { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::AuthenticationFail
            | AppError::AuthFailNoJwtCookie
            | AppError::AuthFailJwtInvalid { .. }
            | AppError::SessionNotFound => StatusCode::UNAUTHORIZED,
            AppError::AdminAuthenticationFail
            | AppError::AuthorizationFail { .. }
            | AppError::AccountBanned => StatusCode::FORBIDDEN,
            AppError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status_code.is_server_error() {
            error!(req_id = %self.req_id, "->> {:?}", self.error);
        } else {
            debug!(req_id = %self.req_id, "->> {:?}", self.error);
        }
        let body = ErrorResponseBody::new(self.error.to_string(), Some(self.req_id.to_string()));
        let mut response = (status_code, axum::Json(body)).into_response();
        // the original error stays available to response layers
        response.extensions_mut().insert(self.error);
        response
    }
}

// External Errors
impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde {
            source: value.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io {
            source: value.to_string(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::AuthFailJwtInvalid {
            source: value.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(value: validator::ValidationErrors) -> Self {
        Self::Validation {
            message: value.to_string(),
        }
    }
}

impl From<CtxError> for AppError {
    fn from(value: CtxError) -> Self {
        value.error
    }
}
