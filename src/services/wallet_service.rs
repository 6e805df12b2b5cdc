use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::entities::money_movement::{ReviewStatus, WithdrawalMethod, WithdrawalRequest};
use crate::entities::platform_settings::PlatformSettings;
use crate::entities::transaction::{Transaction, TransactionStatus, TransactionType};
use crate::entities::user::KycStatus;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::mw_ctx::CtxState;
use crate::models::session::Session;
use crate::models::view::wallet::{BalanceView, DepositView, WithdrawalView};
use crate::utils::money::{format_naira, naira, Amount, MAX_AMOUNT};

/// Withdrawals above this need a verified identity.
pub const KYC_WITHDRAWAL_THRESHOLD: Amount = naira(50_000);

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct DepositInput {
    #[validate(range(max = MAX_AMOUNT, message = "Amount is too large."))]
    pub amount: Amount,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct WithdrawInput {
    #[validate(range(max = MAX_AMOUNT, message = "Amount is too large."))]
    pub amount: Amount,
    pub method: WithdrawalMethod,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub details: String,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct HistoryQuery {
    pub r#type: Option<TransactionType>,
}

pub fn deposited(session: &Session, amount: Amount) -> AppResult<(Session, Transaction)> {
    if amount <= 0 {
        return Err(AppError::validation("Please enter a valid amount."));
    }
    let tx = Transaction::new(
        amount,
        TransactionType::Deposit,
        TransactionStatus::Success,
        "Wallet Deposit via Paystack",
    );
    Ok((session.with_transaction(tx.clone())?, tx))
}

/// Applies the withdrawal rules in order and debits the ledger right away;
/// settlement is left to moderation.
pub fn withdrawn(
    session: &Session,
    settings: &PlatformSettings,
    input: &WithdrawInput,
) -> AppResult<(Session, Transaction, WithdrawalRequest)> {
    if input.amount < settings.min_withdrawal_limit {
        return Err(AppError::validation(format!(
            "Minimum withdrawal is {}",
            format_naira(settings.min_withdrawal_limit)
        )));
    }
    if input.amount > session.balance() {
        return Err(AppError::validation("Insufficient funds."));
    }
    if input.amount > KYC_WITHDRAWAL_THRESHOLD && session.user.kyc_status != KycStatus::Verified {
        return Err(AppError::validation(format!(
            "Withdrawals over {} require KYC verification.",
            format_naira(KYC_WITHDRAWAL_THRESHOLD)
        )));
    }

    let tx = Transaction::new(
        -input.amount,
        TransactionType::Withdrawal,
        TransactionStatus::Pending,
        input.method.ledger_description(),
    );
    let request = WithdrawalRequest {
        id: format!("w-{}", Uuid::new_v4().simple()),
        user_id: session.user.id.clone(),
        user_name: session.user.name.clone(),
        amount: input.amount,
        method: input.method,
        details: input.details.clone(),
        status: ReviewStatus::Pending,
        date: tx.date,
    };
    Ok((session.with_transaction(tx.clone())?, tx, request))
}

pub struct WalletService<'a> {
    state: &'a CtxState,
}

impl<'a> WalletService<'a> {
    pub fn new(state: &'a CtxState) -> Self {
        Self { state }
    }

    pub async fn balance(&self, session_id: &str) -> AppResult<BalanceView> {
        let session = self.state.session(session_id).await?;
        Ok(BalanceView::new(session.balance()))
    }

    pub async fn history(
        &self,
        session_id: &str,
        r#type: Option<TransactionType>,
    ) -> AppResult<Vec<Transaction>> {
        let session = self.state.session(session_id).await?;
        Ok(session.ledger.history(r#type))
    }

    pub async fn deposit(&self, session_id: &str, amount: Amount) -> AppResult<DepositView> {
        let view = self
            .state
            .transition(session_id, |session, board| {
                let (next, transaction) = deposited(session, amount)?;
                let view = DepositView {
                    message: format!("Successfully deposited {}", format_naira(amount)),
                    transaction,
                    balance: BalanceView::new(next.balance()),
                };
                Ok((next, board.clone(), view))
            })
            .await?;
        info!("deposit session={session_id} amount={amount}");
        Ok(view)
    }

    pub async fn withdraw(&self, session_id: &str, input: WithdrawInput) -> AppResult<WithdrawalView> {
        let view = self
            .state
            .transition(session_id, |session, board| {
                let (next, transaction, request) = withdrawn(session, &board.settings, &input)?;
                let view = WithdrawalView {
                    message: "Withdrawal request submitted successfully! Pending admin approval."
                        .to_string(),
                    transaction,
                    request: request.clone(),
                    balance: BalanceView::new(next.balance()),
                };
                Ok((next, board.with_withdrawal(request), view))
            })
            .await?;
        info!(
            "withdrawal request={} amount={}",
            view.request.id, view.request.amount
        );
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user::User;
    use crate::utils::fixtures::template_user;
    use crate::utils::money::AMOUNT_TOO_LARGE_MESSAGE;

    fn session_with(balance: Amount, kyc_status: KycStatus) -> Session {
        Session::open(
            User {
                balance,
                kyc_status,
                ..template_user()
            },
            vec![],
        )
    }

    fn withdraw(amount: Amount, method: WithdrawalMethod) -> WithdrawInput {
        WithdrawInput {
            amount,
            method,
            details: "GTBank 0123456789".to_string(),
        }
    }

    fn err_message(err: AppError) -> String {
        err.to_string()
    }

    #[test]
    fn deposit_credits_exact_amount() {
        let session = session_with(naira(100), KycStatus::None);
        let (next, tx) = deposited(&session, naira(2_500)).unwrap();
        assert_eq!(next.balance(), naira(2_600));
        assert_eq!(next.ledger.len(), session.ledger.len() + 1);
        assert_eq!(tx.r#type, TransactionType::Deposit);
        assert_eq!(tx.status, TransactionStatus::Success);
        assert_eq!(tx.description, "Wallet Deposit via Paystack");
        assert!(deposited(&session, 0).is_err());
    }

    #[test]
    fn deposit_past_i64_is_refused() {
        let session = session_with(naira(100), KycStatus::None);
        let err = deposited(&session, i64::MAX).unwrap_err();
        assert_eq!(err_message(err), AMOUNT_TOO_LARGE_MESSAGE);
        assert_eq!(session.balance(), naira(100));

        assert!(DepositInput { amount: MAX_AMOUNT + 1 }.validate().is_err());
        assert!(DepositInput { amount: MAX_AMOUNT }.validate().is_ok());
        assert!(withdraw(MAX_AMOUNT + 1, WithdrawalMethod::BankTransfer)
            .validate()
            .is_err());
    }

    #[test]
    fn below_minimum_is_rejected() {
        let session = session_with(naira(10_000), KycStatus::None);
        let settings = PlatformSettings::default();
        for amount in [1, naira(500), naira(1_000) - 1] {
            let err = withdrawn(&session, &settings, &withdraw(amount, WithdrawalMethod::BankTransfer))
                .unwrap_err();
            assert_eq!(err_message(err), "Minimum withdrawal is ₦1,000");
        }
    }

    #[test]
    fn more_than_balance_is_rejected() {
        let session = session_with(naira(2_000), KycStatus::Verified);
        let err = withdrawn(
            &session,
            &PlatformSettings::default(),
            &withdraw(naira(2_001), WithdrawalMethod::BankTransfer),
        )
        .unwrap_err();
        assert_eq!(err_message(err), "Insufficient funds.");
    }

    #[test]
    fn large_withdrawal_needs_verified_kyc() {
        let settings = PlatformSettings::default();
        let input = withdraw(naira(50_001), WithdrawalMethod::MobileMoney);
        for kyc in [KycStatus::None, KycStatus::Pending, KycStatus::Rejected] {
            let err = withdrawn(&session_with(naira(80_000), kyc), &settings, &input).unwrap_err();
            assert_eq!(
                err_message(err),
                "Withdrawals over ₦50,000 require KYC verification."
            );
        }
        assert!(withdrawn(&session_with(naira(80_000), KycStatus::Verified), &settings, &input).is_ok());
        // exactly the threshold is allowed without kyc
        let at_threshold = withdraw(naira(50_000), WithdrawalMethod::BankTransfer);
        assert!(withdrawn(&session_with(naira(80_000), KycStatus::None), &settings, &at_threshold).is_ok());
    }

    #[test]
    fn successful_withdrawal_debits_pending_entry() {
        let session = session_with(naira(4_500), KycStatus::None);
        let (next, tx, request) = withdrawn(
            &session,
            &PlatformSettings::default(),
            &withdraw(naira(1_500), WithdrawalMethod::BankTransfer),
        )
        .unwrap();
        assert_eq!(next.balance(), naira(3_000));
        assert_eq!(tx.amount, -naira(1_500));
        assert_eq!(tx.r#type, TransactionType::Withdrawal);
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.description, "Withdrawal to Bank");
        assert_eq!(request.status, ReviewStatus::Pending);
        assert_eq!(request.amount, naira(1_500));
        assert_eq!(request.user_id, "u1");
    }

    #[test]
    fn mobile_money_description() {
        let session = session_with(naira(4_500), KycStatus::None);
        let (_, tx, _) = withdrawn(
            &session,
            &PlatformSettings::default(),
            &withdraw(naira(1_000), WithdrawalMethod::MobileMoney),
        )
        .unwrap();
        assert_eq!(tx.description, "Withdrawal to Mobile Money");
    }
}
