use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub task_id: String,
    pub worker_id: String,
    pub proof_text: String,
    /// File name of the uploaded screenshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_image: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn pending(task_id: &str, worker_id: &str, proof_text: String, proof_image: Option<String>) -> Self {
        Self {
            id: format!("s-{}", Uuid::new_v4().simple()),
            task_id: task_id.to_string(),
            worker_id: worker_id.to_string(),
            proof_text,
            proof_image,
            status: SubmissionStatus::Pending,
            submitted_at: Utc::now(),
        }
    }
}
