use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::interfaces::session_store::SessionStoreInterface;
use crate::models::session::Session;

/// Keeps sessions for the lifetime of the process only.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStoreInterface for MemorySessionStore {
    async fn load_all(&self) -> Result<Vec<Session>, String> {
        Ok(self.sessions.lock().await.values().cloned().collect())
    }

    async fn save(&self, session: &Session) -> Result<(), String> {
        self.sessions
            .lock()
            .await
            .insert(session.storage_key(), session.clone());
        Ok(())
    }

    async fn remove(&self, session: &Session) -> Result<(), String> {
        self.sessions.lock().await.remove(&session.storage_key());
        Ok(())
    }
}
