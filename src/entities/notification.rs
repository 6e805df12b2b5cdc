use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub r#type: NotificationType,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn unread(user_id: &str, r#type: NotificationType, title: &str, message: &str) -> Self {
        Self {
            id: format!("n-{}", Uuid::new_v4().simple()),
            user_id: user_id.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            r#type,
            read: false,
            created_at: Utc::now(),
        }
    }
}
