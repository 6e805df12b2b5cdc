use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use crate::interfaces::session_store::SessionStoreInterface;
use crate::models::session::{Session, SESSION_KEY};

/// One JSON file per session, named after the session storage key.
pub struct FileSessionStore {
    dir: String,
}

impl FileSessionStore {
    pub fn new(dir: String) -> Self {
        FileSessionStore { dir }
    }

    fn path_of(&self, session: &Session) -> PathBuf {
        PathBuf::from(&self.dir).join(format!("{}.json", session.storage_key()))
    }
}

#[async_trait]
impl SessionStoreInterface for FileSessionStore {
    async fn load_all(&self) -> Result<Vec<Session>, String> {
        fs::create_dir_all(&self.dir).await.map_err(|e| e.to_string())?;
        let mut entries = fs::read_dir(&self.dir).await.map_err(|e| e.to_string())?;
        let mut sessions = vec![];
        while let Some(entry) = entries.next_entry().await.map_err(|e| e.to_string())? {
            let file_name = entry.file_name().to_string_lossy().to_string();
            if !file_name.starts_with(SESSION_KEY) || !file_name.ends_with(".json") {
                continue;
            }
            let content = match fs::read_to_string(entry.path()).await {
                Ok(content) => content,
                Err(err) => {
                    warn!("skipping session file {file_name}: {err}");
                    continue;
                }
            };
            match serde_json::from_str::<Session>(&content) {
                Ok(session) => sessions.push(session),
                Err(err) => warn!("skipping unreadable session file {file_name}: {err}"),
            }
        }
        Ok(sessions)
    }

    async fn save(&self, session: &Session) -> Result<(), String> {
        fs::create_dir_all(&self.dir).await.map_err(|e| e.to_string())?;
        let body = serde_json::to_vec_pretty(session).map_err(|e| e.to_string())?;
        fs::write(self.path_of(session), body)
            .await
            .map_err(|e| e.to_string())
    }

    async fn remove(&self, session: &Session) -> Result<(), String> {
        match fs::remove_file(self.path_of(session)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.to_string()),
        }
    }
}
