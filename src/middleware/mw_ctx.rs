use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::config::{AppConfig, OriginCheckKind};
use crate::entities::user::{UserRole, UserStatus};
use crate::interfaces::generative_model::GenerativeModelInterface;
use crate::interfaces::origin_check::OriginCheckInterface;
use crate::interfaces::session_store::SessionStoreInterface;
use crate::middleware::error::{AppError, AppResult};
use crate::models::market_board::MarketBoard;
use crate::models::session::Session;
use crate::utils::admin_credentials::AdminCredentials;
use crate::utils::file_session_store::FileSessionStore;
use crate::utils::fixtures;
use crate::utils::gemini::GeminiClient;
use crate::utils::jwt::JWT;
use crate::utils::origin_checks::{RandomOriginCheck, RepeatSubmissionCheck};

pub const JWT_KEY: &str = "jwt";

/// Fixed waits standing in for remote round trips.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedLatency {
    base: Duration,
}

impl SimulatedLatency {
    pub fn new(base: Duration) -> Self {
        Self { base }
    }

    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub async fn standard(&self) {
        Self::wait(self.base).await
    }

    /// Half again the standard wait, used by KYC upload and admin login.
    pub async fn extended(&self) {
        Self::wait(self.base * 3 / 2).await
    }

    async fn wait(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

pub struct CtxState {
    pub is_development: bool,
    pub jwt: JWT,
    pub admin_credentials: AdminCredentials,
    pub sessions: RwLock<HashMap<String, Session>>,
    pub board: RwLock<MarketBoard>,
    pub session_store: Arc<dyn SessionStoreInterface + Send + Sync>,
    pub origin_check: Arc<dyn OriginCheckInterface + Send + Sync>,
    pub ai_model: Option<Arc<dyn GenerativeModelInterface + Send + Sync>>,
    pub latency: SimulatedLatency,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CTX STATE HERE :)")
    }
}

impl CtxState {
    pub async fn session(&self, session_id: &str) -> AppResult<Session> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or(AppError::SessionNotFound)
    }

    pub async fn board(&self) -> MarketBoard {
        self.board.read().await.clone()
    }

    /// Registers a freshly opened session. A user already in the directory
    /// keeps the status moderation gave it.
    pub async fn open_session(&self, session: Session) -> Session {
        let session = {
            let mut sessions = self.sessions.write().await;
            let mut board = self.board.write().await;
            let session = match board.user_status(&session.user.id) {
                Some(status) if session.user.role != UserRole::Admin => {
                    session.with_user_status(status)
                }
                _ => session,
            };
            if session.user.role != UserRole::Admin {
                *board = board.upsert_user(&session.user);
            }
            sessions.insert(session.id.clone(), session.clone());
            session
        };
        self.persist(&session).await;
        session
    }

    /// Copies a moderation status onto every live session of the user.
    pub async fn apply_user_status(&self, user_id: &str, status: UserStatus) {
        let updated: Vec<Session> = {
            let mut sessions = self.sessions.write().await;
            sessions
                .values_mut()
                .filter(|session| session.user.id == user_id)
                .map(|session| {
                    *session = session.with_user_status(status);
                    session.clone()
                })
                .collect()
        };
        for session in &updated {
            self.persist(session).await;
        }
    }

    /// Runs one transition over the session and the board and swaps both
    /// snapshots in when it succeeds.
    pub async fn transition<T, F>(&self, session_id: &str, apply: F) -> AppResult<T>
    where
        F: FnOnce(&Session, &MarketBoard) -> AppResult<(Session, MarketBoard, T)>,
    {
        let (session, output) = {
            let mut sessions = self.sessions.write().await;
            let mut board = self.board.write().await;
            let current = sessions
                .get(session_id)
                .ok_or(AppError::SessionNotFound)?;
            let (session, next_board, output) = apply(current, &*board)?;
            *board = match session.user.role {
                UserRole::Admin => next_board,
                _ => next_board.upsert_user(&session.user),
            };
            sessions.insert(session_id.to_string(), session.clone());
            (session, output)
        };
        self.persist(&session).await;
        Ok(output)
    }

    /// Board-only transition, used by moderation.
    pub async fn update_board<T, F>(&self, apply: F) -> AppResult<T>
    where
        F: FnOnce(&MarketBoard) -> AppResult<(MarketBoard, T)>,
    {
        let mut board = self.board.write().await;
        let (next, output) = apply(&*board)?;
        *board = next;
        Ok(output)
    }

    pub async fn remove_session(&self, session_id: &str) -> AppResult<()> {
        let session = self
            .sessions
            .write()
            .await
            .remove(session_id)
            .ok_or(AppError::SessionNotFound)?;
        if let Err(err) = self.session_store.remove(&session).await {
            error!("failed to remove stored session {}: {err}", session.id);
        }
        Ok(())
    }

    /// Loads persisted sessions back into memory.
    pub async fn restore_sessions(&self) {
        match self.session_store.load_all().await {
            Ok(stored) => {
                let mut sessions = self.sessions.write().await;
                let mut board = self.board.write().await;
                for session in stored {
                    if session.user.role != UserRole::Admin {
                        *board = board.upsert_user(&session.user);
                    }
                    sessions.insert(session.id.clone(), session);
                }
                info!("restored {} sessions", sessions.len());
            }
            Err(err) => error!("failed to load stored sessions: {err}"),
        }
    }

    async fn persist(&self, session: &Session) {
        if let Err(err) = self.session_store.save(session).await {
            error!("failed to persist session {}: {err}", session.id);
        }
    }
}

pub fn create_ctx_state(config: &AppConfig) -> Result<Arc<CtxState>, String> {
    let origin_check: Arc<dyn OriginCheckInterface + Send + Sync> = match config.origin_check {
        OriginCheckKind::Random => Arc::new(RandomOriginCheck::new(
            config.duplicate_origin_probability,
        )),
        OriginCheckKind::Repeat => Arc::new(RepeatSubmissionCheck),
    };
    let ai_model = config.gemini_api_key.as_deref().map(|key| {
        Arc::new(GeminiClient::new(
            key,
            &config.gemini_api_url,
            &config.gemini_model,
        )) as Arc<dyn GenerativeModelInterface + Send + Sync>
    });

    let ctx_state = CtxState {
        is_development: config.is_development,
        jwt: JWT::new(config.jwt_secret.clone(), TimeDelta::days(7)),
        admin_credentials: AdminCredentials::new(&config.admin_email, &config.admin_password)?,
        sessions: RwLock::new(HashMap::new()),
        board: RwLock::new(fixtures::seed_board()),
        session_store: Arc::new(FileSessionStore::new(config.session_store_dir.clone())),
        origin_check,
        ai_model,
        latency: SimulatedLatency::new(Duration::from_millis(config.simulated_latency_ms)),
    };
    Ok(Arc::new(ctx_state))
}
