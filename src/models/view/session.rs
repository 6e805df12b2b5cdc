use serde::{Deserialize, Serialize};

use crate::entities::notification::Notification;
use crate::entities::user::User;
use crate::models::session::Session;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub user: User,
    pub unread_count: usize,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        SessionView {
            user: session.user.clone(),
            unread_count: session.unread_count(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationsView {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

impl From<&Session> for NotificationsView {
    fn from(session: &Session) -> Self {
        NotificationsView {
            notifications: session.notifications.clone(),
            unread_count: session.unread_count(),
        }
    }
}

/// Plain outcome message shown inline by the client.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageView {
    pub message: String,
}

impl MessageView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
