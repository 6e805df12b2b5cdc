use async_trait::async_trait;

use crate::models::session::Session;

/// Durable home of logged-in sessions, one record per session.
#[async_trait]
pub trait SessionStoreInterface {
    async fn load_all(&self) -> Result<Vec<Session>, String>;
    async fn save(&self, session: &Session) -> Result<(), String>;
    async fn remove(&self, session: &Session) -> Result<(), String>;
}
