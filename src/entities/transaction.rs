use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::middleware::error::{AppError, AppResult};
use crate::utils::money::{Amount, AMOUNT_TOO_LARGE_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Earning,
    Spend,
    Adjustment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Success,
    Pending,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Signed, debits are negative.
    pub amount: Amount,
    pub r#type: TransactionType,
    pub status: TransactionStatus,
    pub date: NaiveDate,
    pub description: String,
}

impl Transaction {
    pub fn new(
        amount: Amount,
        r#type: TransactionType,
        status: TransactionStatus,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("tx-{}", Uuid::new_v4().simple()),
            amount,
            r#type,
            status,
            date: Utc::now().date_naive(),
            description: description.into(),
        }
    }

    fn counts_towards_balance(&self) -> bool {
        self.status != TransactionStatus::Failed
    }
}

/// Append-only record of balance-affecting events; the balance is derived
/// from it and stored nowhere else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<Transaction>,
}

impl Ledger {
    pub fn opening(balance: Amount) -> Self {
        Self {
            entries: vec![Transaction::new(
                balance,
                TransactionType::Adjustment,
                TransactionStatus::Success,
                "Opening balance",
            )],
        }
    }

    /// Refuses an entry that would take the balance outside `i64`.
    pub fn appended(&self, tx: Transaction) -> AppResult<Self> {
        let mut entries = self.entries.clone();
        entries.push(tx);
        let next = Self { entries };
        match next.checked_balance() {
            Some(_) => Ok(next),
            None => Err(AppError::validation(AMOUNT_TOO_LARGE_MESSAGE)),
        }
    }

    /// Sum of every entry that has not failed; pending withdrawals are
    /// already debited.
    pub fn balance(&self) -> Amount {
        self.entries
            .iter()
            .filter(|tx| tx.counts_towards_balance())
            .fold(0, |sum: Amount, tx| sum.saturating_add(tx.amount))
    }

    fn checked_balance(&self) -> Option<Amount> {
        self.entries
            .iter()
            .filter(|tx| tx.counts_towards_balance())
            .try_fold(0, |sum: Amount, tx| sum.checked_add(tx.amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.entries.last()
    }

    /// Newest first.
    pub fn history(&self, r#type: Option<TransactionType>) -> Vec<Transaction> {
        self.entries
            .iter()
            .rev()
            .filter(|tx| r#type.map_or(true, |t| tx.r#type == t))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_skips_failed_entries() {
        let ledger = Ledger::opening(1_000)
            .appended(Transaction::new(
                -400,
                TransactionType::Withdrawal,
                TransactionStatus::Pending,
                "w",
            ))
            .unwrap()
            .appended(Transaction::new(
                9_999,
                TransactionType::Deposit,
                TransactionStatus::Failed,
                "d",
            ))
            .unwrap();
        assert_eq!(ledger.balance(), 600);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn appending_leaves_previous_snapshot_untouched() {
        let before = Ledger::opening(10);
        let after = before
            .appended(Transaction::new(
                5,
                TransactionType::Earning,
                TransactionStatus::Success,
                "e",
            ))
            .unwrap();
        assert_eq!(before.balance(), 10);
        assert_eq!(after.balance(), 15);
    }

    #[test]
    fn history_is_newest_first_and_filterable() {
        let ledger = Ledger::opening(0)
            .appended(Transaction::new(
                100,
                TransactionType::Deposit,
                TransactionStatus::Success,
                "first",
            ))
            .unwrap()
            .appended(Transaction::new(
                200,
                TransactionType::Deposit,
                TransactionStatus::Success,
                "second",
            ))
            .unwrap();
        let deposits = ledger.history(Some(TransactionType::Deposit));
        assert_eq!(deposits.len(), 2);
        assert_eq!(deposits[0].description, "second");
        assert_eq!(ledger.history(None).len(), 3);
    }

    #[test]
    fn overflowing_entry_is_refused() {
        let ledger = Ledger::opening(i64::MAX - 10);
        let err = ledger
            .appended(Transaction::new(
                11,
                TransactionType::Deposit,
                TransactionStatus::Success,
                "d",
            ))
            .unwrap_err();
        assert_eq!(err.to_string(), AMOUNT_TOO_LARGE_MESSAGE);
        assert_eq!(ledger.balance(), i64::MAX - 10);

        // failed entries never count, so they cannot overflow
        let failed = ledger
            .appended(Transaction::new(
                i64::MAX,
                TransactionType::Deposit,
                TransactionStatus::Failed,
                "d",
            ))
            .unwrap();
        assert_eq!(failed.balance(), i64::MAX - 10);
    }
}
