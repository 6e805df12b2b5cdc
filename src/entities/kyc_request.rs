use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::KycStatus;

/// Identity document filed for review. Its status is tracked apart from
/// `User::kyc_status` and the two are not reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycRequest {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub document_type: String,
    pub document_url: String,
    pub status: KycStatus,
    pub submitted_at: DateTime<Utc>,
}
