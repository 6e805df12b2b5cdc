use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::utils::money::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Active,
    Paused,
    Rejected,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProofType {
    Screenshot,
    Text,
    Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub advertiser_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub platform: String,
    pub reward: Amount,
    pub total_slots: u32,
    pub filled_slots: u32,
    pub status: TaskStatus,
    pub requirements: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_type: Option<ProofType>,
}

impl Task {
    pub fn requires_screenshot(&self) -> bool {
        self.proof_type == Some(ProofType::Screenshot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskAction {
    Approve,
    Reject,
    Pause,
    Activate,
    Delete,
}

impl TaskAction {
    /// Status a task moves to, `None` when the task is removed.
    pub fn target_status(self) -> Option<TaskStatus> {
        match self {
            TaskAction::Approve | TaskAction::Activate => Some(TaskStatus::Active),
            TaskAction::Reject => Some(TaskStatus::Rejected),
            TaskAction::Pause => Some(TaskStatus::Paused),
            TaskAction::Delete => None,
        }
    }
}

pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TaskFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) | Some("") => true,
            Some(category) => task.category == category,
        };
        let search_ok = match self.search.as_deref() {
            None => true,
            Some(term) => task.title.to_lowercase().contains(&term.to_lowercase()),
        };
        let status_ok = task.status == self.status.unwrap_or(TaskStatus::Active);
        category_ok && search_ok && status_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, category: &str, status: TaskStatus) -> Task {
        Task {
            id: "t".to_string(),
            advertiser_id: "a1".to_string(),
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            platform: "Web".to_string(),
            reward: 5_000,
            total_slots: 10,
            filled_slots: 0,
            status,
            requirements: vec![],
            created_at: Utc::now(),
            expiry_date: None,
            proof_type: None,
        }
    }

    #[test]
    fn default_filter_shows_only_active_tasks() {
        let filter = TaskFilter::default();
        assert!(filter.matches(&task("A", "Writing", TaskStatus::Active)));
        assert!(!filter.matches(&task("A", "Writing", TaskStatus::Pending)));
    }

    #[test]
    fn search_is_case_insensitive_on_title() {
        let filter = TaskFilter {
            search: Some("instagram".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&task("Follow our Instagram Page", "Social Media", TaskStatus::Active)));
        assert!(!filter.matches(&task("Watch video", "Social Media", TaskStatus::Active)));
    }

    #[test]
    fn all_category_matches_everything() {
        let all = TaskFilter {
            category: Some(ALL_CATEGORIES.to_string()),
            ..Default::default()
        };
        let writing = TaskFilter {
            category: Some("Writing".to_string()),
            ..Default::default()
        };
        let t = task("Review", "App Testing", TaskStatus::Active);
        assert!(all.matches(&t));
        assert!(!writing.matches(&t));
    }

    #[test]
    fn actions_map_to_statuses() {
        assert_eq!(TaskAction::Activate.target_status(), Some(TaskStatus::Active));
        assert_eq!(TaskAction::Pause.target_status(), Some(TaskStatus::Paused));
        assert_eq!(TaskAction::Delete.target_status(), None);
    }
}
