use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::utils::money::Amount;

/// Review state of admin-moderated deposits and withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: String,
    pub advertiser_name: String,
    pub amount: Amount,
    pub date: NaiveDate,
    pub status: ReviewStatus,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WithdrawalMethod {
    BankTransfer,
    MobileMoney,
    PaystackTransfer,
}

impl WithdrawalMethod {
    pub fn ledger_description(self) -> &'static str {
        match self {
            WithdrawalMethod::BankTransfer => "Withdrawal to Bank",
            _ => "Withdrawal to Mobile Money",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub amount: Amount,
    pub method: WithdrawalMethod,
    /// Account number, bank name and similar payout details.
    pub details: String,
    pub status: ReviewStatus,
    pub date: NaiveDate,
}
