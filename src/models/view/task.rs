use serde::{Deserialize, Serialize};

use crate::entities::submission::Submission;
use crate::entities::task::Task;
use crate::utils::money::Amount;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedTaskView {
    pub task: Task,
    /// Reward times slots plus the platform fee, as debited.
    pub total_cost: Amount,
    pub balance: Amount,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionResultView {
    pub message: String,
    pub submission: Submission,
}
