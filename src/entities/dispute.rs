use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeStatus {
    Open,
    ResolvedWorker,
    ResolvedAdvertiser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dispute {
    pub id: String,
    pub task_id: String,
    pub worker_id: String,
    pub advertiser_id: String,
    pub reason: String,
    pub status: DisputeStatus,
    pub created_at: NaiveDate,
}
