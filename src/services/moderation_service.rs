use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::entities::category::Category;
use crate::entities::dispute::{Dispute, DisputeStatus};
use crate::entities::kyc_request::KycRequest;
use crate::entities::money_movement::{Deposit, ReviewStatus, WithdrawalRequest};
use crate::entities::platform_settings::PlatformSettings;
use crate::entities::task::{Task, TaskAction};
use crate::entities::user::{KycStatus, User, UserStatus};
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::mw_ctx::CtxState;
use crate::models::market_board::MarketBoard;
use crate::models::view::admin::AdminStats;
use crate::utils::money::Amount;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct UserSearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UserStatusInput {
    pub status: UserStatus,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct TaskActionInput {
    pub action: TaskAction,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ReviewInput {
    pub status: ReviewStatus,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct DisputeInput {
    pub status: DisputeStatus,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct KycReviewInput {
    pub status: KycStatus,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CategoryInput {
    pub name: String,
    pub min_price: Amount,
}

fn review_outcome(status: ReviewStatus) -> AppResult<ReviewStatus> {
    match status {
        ReviewStatus::Approved | ReviewStatus::Rejected => Ok(status),
        ReviewStatus::Pending => Err(AppError::validation(
            "Status must be APPROVED or REJECTED.",
        )),
    }
}

fn dispute_outcome(status: DisputeStatus) -> AppResult<DisputeStatus> {
    match status {
        DisputeStatus::ResolvedWorker | DisputeStatus::ResolvedAdvertiser => Ok(status),
        DisputeStatus::Open => Err(AppError::validation(
            "Status must be RESOLVED_WORKER or RESOLVED_ADVERTISER.",
        )),
    }
}

fn kyc_outcome(status: KycStatus) -> AppResult<KycStatus> {
    match status {
        KycStatus::Verified | KycStatus::Rejected => Ok(status),
        _ => Err(AppError::validation("Status must be VERIFIED or REJECTED.")),
    }
}

fn find<T, F>(items: &[T], id: &str, matches: F) -> AppResult<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    items
        .iter()
        .find(|item| matches(item))
        .cloned()
        .ok_or_else(|| AppError::not_found(id))
}

/// Status overwrites on the moderation board. None of them touch a
/// session ledger.
pub struct ModerationService<'a> {
    state: &'a CtxState,
}

impl<'a> ModerationService<'a> {
    pub fn new(state: &'a CtxState) -> Self {
        Self { state }
    }

    async fn update<T, F>(&self, apply: F) -> AppResult<T>
    where
        F: FnOnce(&MarketBoard) -> AppResult<(MarketBoard, T)>,
    {
        self.state.update_board(apply).await
    }

    pub async fn users(&self, search: Option<&str>) -> Vec<User> {
        self.state.board.read().await.search_users(search)
    }

    pub async fn set_user_status(&self, user_id: &str, status: UserStatus) -> AppResult<User> {
        let user = self
            .update(|board| {
                let next = board.set_user_status(user_id, status)?;
                let user = find(&next.users, user_id, |u| u.id == user_id)?;
                Ok((next, user))
            })
            .await?;
        self.state.apply_user_status(user_id, status).await;
        info!("user {user_id} status set to {status}");
        Ok(user)
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.state.board.read().await.tasks.clone()
    }

    /// Returns the updated task, `None` once deleted.
    pub async fn apply_task_action(
        &self,
        task_id: &str,
        action: TaskAction,
    ) -> AppResult<Option<Task>> {
        let task = self
            .update(|board| {
                let next = board.apply_task_action(task_id, action)?;
                let task = next.find_task(task_id).ok().cloned();
                Ok((next, task))
            })
            .await?;
        info!("task {task_id} action {action}");
        Ok(task)
    }

    pub async fn deposits(&self) -> Vec<Deposit> {
        self.state.board.read().await.deposits.clone()
    }

    pub async fn set_deposit_status(&self, id: &str, status: ReviewStatus) -> AppResult<Deposit> {
        let status = review_outcome(status)?;
        self.update(|board| {
            let next = board.set_deposit_status(id, status)?;
            let deposit = find(&next.deposits, id, |d| d.id == id)?;
            Ok((next, deposit))
        })
        .await
    }

    pub async fn withdrawals(&self) -> Vec<WithdrawalRequest> {
        self.state.board.read().await.withdrawals.clone()
    }

    pub async fn set_withdrawal_status(
        &self,
        id: &str,
        status: ReviewStatus,
    ) -> AppResult<WithdrawalRequest> {
        let status = review_outcome(status)?;
        self.update(|board| {
            let next = board.set_withdrawal_status(id, status)?;
            let request = find(&next.withdrawals, id, |w| w.id == id)?;
            Ok((next, request))
        })
        .await
    }

    pub async fn disputes(&self) -> Vec<Dispute> {
        self.state.board.read().await.disputes.clone()
    }

    pub async fn set_dispute_status(&self, id: &str, status: DisputeStatus) -> AppResult<Dispute> {
        let status = dispute_outcome(status)?;
        self.update(|board| {
            let next = board.set_dispute_status(id, status)?;
            let dispute = find(&next.disputes, id, |d| d.id == id)?;
            Ok((next, dispute))
        })
        .await
    }

    pub async fn kyc_requests(&self) -> Vec<KycRequest> {
        self.state.board.read().await.kyc_requests.clone()
    }

    pub async fn set_kyc_status(&self, id: &str, status: KycStatus) -> AppResult<KycRequest> {
        let status = kyc_outcome(status)?;
        self.update(|board| {
            let next = board.set_kyc_status(id, status)?;
            let request = find(&next.kyc_requests, id, |k| k.id == id)?;
            Ok((next, request))
        })
        .await
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.state.board.read().await.categories.clone()
    }

    pub async fn add_category(&self, input: CategoryInput) -> AppResult<Category> {
        let category = self
            .update(|board| board.add_category(&input.name, input.min_price))
            .await?;
        info!("category {} added", category.id);
        Ok(category)
    }

    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        self.update(|board| Ok((board.delete_category(id)?, ())))
            .await
    }

    pub async fn settings(&self) -> PlatformSettings {
        self.state.board.read().await.settings.clone()
    }

    pub async fn update_settings(&self, settings: PlatformSettings) -> AppResult<PlatformSettings> {
        settings.validate()?;
        self.update(|board| Ok((board.with_settings(settings.clone()), settings)))
            .await
    }

    pub async fn stats(&self) -> AdminStats {
        self.state.board.read().await.stats()
    }
}
