use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::entities::kyc_request::KycRequest;
use crate::entities::user::{KycStatus, User, UserOverrides, UserRole, UserStatus};
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::mw_ctx::CtxState;
use crate::models::market_board::MarketBoard;
use crate::models::session::Session;
use crate::utils::fixtures::{admin_overrides, demo_notifications, template_user};
use crate::utils::generate::random_digits;
use crate::utils::jwt::TokenType;
use crate::utils::money::{Amount, MAX_AMOUNT, MIN_AMOUNT};
use crate::utils::validate_utils::{
    trim_string, validate_phone_number, validate_public_role, validate_username,
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct LoginInput {
    #[validate(custom(function = validate_public_role))]
    pub role: UserRole,
    #[serde(default)]
    pub overrides: Option<UserOverrides>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RegisterInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(custom(function = validate_public_role))]
    pub role: UserRole,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = validate_phone_number))]
    pub phone_number: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AdminLoginInput {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Development-only balance adjustment.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct BalanceDeltaInput {
    #[validate(range(min = MIN_AMOUNT, max = MAX_AMOUNT, message = "Amount is too large."))]
    pub delta: Amount,
}

/// Template user with the requested role and overrides applied.
pub fn login_user(role: UserRole, overrides: Option<UserOverrides>) -> User {
    let user = User {
        role,
        ..template_user()
    };
    match overrides {
        Some(overrides) => overrides.apply(user),
        None => user,
    }
}

fn user_id_from_phone(phone_number: &str) -> String {
    let chars: Vec<char> = phone_number.chars().collect();
    if chars.len() >= 6 {
        chars[chars.len() - 6..].iter().collect()
    } else {
        random_digits(6)
    }
}

/// Percent-encodes everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, so a
/// space becomes `%20`.
fn encode_uri_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(char::from(byte)),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        encode_uri_component(name)
    )
}

pub fn registered_user(input: RegisterInput) -> AppResult<User> {
    Ok(User {
        id: user_id_from_phone(&input.phone_number),
        avatar_url: avatar_url(&input.name),
        name: input.name,
        email: input.email,
        role: input.role,
        balance: 0,
        username: input.username,
        phone_number: input.phone_number,
        status: UserStatus::Active,
        joined_at: Utc::now().date_naive(),
        kyc_status: KycStatus::None,
        referral_count: 0,
    })
}

pub fn ensure_kyc_open(session: &Session) -> AppResult<()> {
    match session.user.kyc_status {
        KycStatus::Pending => Err(AppError::validation(
            "Your KYC documents are already under review.",
        )),
        KycStatus::Verified => Err(AppError::validation("Your identity is already verified.")),
        KycStatus::None | KycStatus::Rejected => Ok(()),
    }
}

/// Marks the session pending review and files the request with moderation.
pub fn kyc_submitted(
    session: &Session,
    board: &MarketBoard,
    document_type: &str,
    document: &str,
) -> AppResult<(Session, MarketBoard)> {
    ensure_kyc_open(session)?;
    let request = KycRequest {
        id: format!("k{}", Utc::now().timestamp_millis()),
        user_id: session.user.id.clone(),
        user_name: session.user.name.clone(),
        document_type: document_type.to_string(),
        document_url: document.to_string(),
        status: KycStatus::Pending,
        submitted_at: Utc::now(),
    };
    Ok((session.with_kyc_submitted(), board.with_kyc_request(request)))
}

pub struct SessionService<'a> {
    state: &'a CtxState,
}

impl<'a> SessionService<'a> {
    pub fn new(state: &'a CtxState) -> Self {
        Self { state }
    }

    async fn ensure_not_banned(&self, user: &User) -> AppResult<()> {
        match self.state.board.read().await.user_status(&user.id) {
            Some(UserStatus::Banned) => Err(AppError::AccountBanned),
            _ => Ok(()),
        }
    }

    async fn start(&self, session: Session, token_type: TokenType) -> AppResult<(Session, String)> {
        let token = self
            .state
            .jwt
            .create(&session.id, token_type)
            .map_err(|description| AppError::Generic { description })?;
        let session = self.state.open_session(session).await;
        Ok((session, token))
    }

    pub async fn login(&self, input: LoginInput) -> AppResult<(Session, String)> {
        let user = login_user(input.role, input.overrides);
        self.ensure_not_banned(&user).await?;
        let notifications = demo_notifications(&user.id);
        let session = Session::open(user, notifications);
        info!("login user={} role={}", session.user.id, session.user.role);
        self.start(session, TokenType::Login).await
    }

    pub async fn register(&self, input: RegisterInput) -> AppResult<(Session, String)> {
        let user = registered_user(input)?;
        self.ensure_not_banned(&user).await?;
        let session = Session::open(user, vec![]);
        info!("registered user={} role={}", session.user.id, session.user.role);
        self.start(session, TokenType::Login).await
    }

    pub async fn admin_login(&self, input: AdminLoginInput) -> AppResult<(Session, String)> {
        self.state.latency.extended().await;
        if !self.state.admin_credentials.verify(&input.email, &input.password) {
            info!("rejected admin login");
            return Err(AppError::AdminAuthenticationFail);
        }
        let overrides = admin_overrides(self.state.admin_credentials.email());
        let user = login_user(UserRole::Admin, Some(overrides));
        let session = Session::open(user, demo_notifications("admin-root"));
        info!("admin login session={}", session.id);
        self.start(session, TokenType::Admin).await
    }

    pub async fn logout(&self, session_id: &str) -> AppResult<()> {
        self.state.remove_session(session_id).await
    }

    async fn update_session<F>(&self, session_id: &str, apply: F) -> AppResult<Session>
    where
        F: FnOnce(&Session) -> AppResult<Session>,
    {
        self.state
            .transition(session_id, |current, board| {
                let next = apply(current)?;
                Ok((next.clone(), board.clone(), next))
            })
            .await
    }

    pub async fn switch_role(&self, session_id: &str) -> AppResult<Session> {
        let session = self
            .update_session(session_id, |session| Ok(session.switch_role()))
            .await?;
        info!("session={session_id} switched to {}", session.user.role);
        Ok(session)
    }

    pub async fn update_balance(&self, session_id: &str, delta: Amount) -> AppResult<Session> {
        self.update_session(session_id, |session| session.update_balance(delta))
            .await
    }

    pub async fn mark_notification_read(
        &self,
        session_id: &str,
        notification_id: &str,
    ) -> AppResult<Session> {
        self.update_session(session_id, |session| {
            Ok(session.mark_notification_read(notification_id))
        })
        .await
    }

    pub async fn mark_all_notifications_read(&self, session_id: &str) -> AppResult<Session> {
        self.update_session(session_id, |session| {
            Ok(session.mark_all_notifications_read())
        })
            .await
    }

    pub async fn submit_kyc(
        &self,
        session: &Session,
        document_type: &str,
        document: &str,
    ) -> AppResult<Session> {
        ensure_kyc_open(session)?;
        self.state.latency.extended().await;
        self.state
            .transition(&session.id, |current, board| {
                let (next, board) = kyc_submitted(current, board, document_type, document)?;
                Ok((next.clone(), board, next))
            })
            .await
    }
}
