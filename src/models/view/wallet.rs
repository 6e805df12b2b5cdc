use serde::{Deserialize, Serialize};

use crate::entities::money_movement::WithdrawalRequest;
use crate::entities::transaction::Transaction;
use crate::utils::money::{format_naira, Amount};

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceView {
    pub balance: Amount,
    pub formatted: String,
}

impl BalanceView {
    pub fn new(balance: Amount) -> Self {
        Self {
            balance,
            formatted: format_naira(balance),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DepositView {
    pub message: String,
    pub transaction: Transaction,
    pub balance: BalanceView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WithdrawalView {
    pub message: String,
    pub transaction: Transaction,
    pub request: WithdrawalRequest,
    pub balance: BalanceView,
}
