use serde::{Deserialize, Serialize};

use crate::utils::money::Amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: usize,
    pub active_tasks: usize,
    /// Sum of approved deposits.
    pub total_deposits: Amount,
    /// Sum of approved withdrawals.
    pub total_withdrawals: Amount,
    pub pending_withdrawals: usize,
    pub pending_tasks: usize,
    pub pending_kyc: usize,
    pub pending_deposits: usize,
    pub open_disputes: usize,
}
