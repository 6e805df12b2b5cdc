use chrono::Utc;
use serde::Serialize;

use crate::entities::category::Category;
use crate::entities::dispute::{Dispute, DisputeStatus};
use crate::entities::kyc_request::KycRequest;
use crate::entities::money_movement::{Deposit, ReviewStatus, WithdrawalRequest};
use crate::entities::platform_settings::PlatformSettings;
use crate::entities::submission::{Submission, SubmissionStatus};
use crate::entities::task::{Task, TaskAction, TaskFilter, TaskStatus};
use crate::entities::user::{KycStatus, User, UserStatus};
use crate::middleware::error::{AppError, AppResult};
use crate::models::view::admin::AdminStats;
use crate::utils::money::Amount;

pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($t:ty),*) => {
        $(impl Identified for $t {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

identified!(User, Task, Submission, Deposit, WithdrawalRequest, Dispute, Category, KycRequest);

/// Copy of `items` with the element matching `id` replaced by `update`.
fn replaced<T, F>(items: &[T], id: &str, update: F) -> AppResult<Vec<T>>
where
    T: Identified + Clone,
    F: FnOnce(&T) -> T,
{
    let pos = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| AppError::not_found(id))?;
    let mut next = items.to_vec();
    next[pos] = update(&items[pos]);
    Ok(next)
}

fn without<T: Identified + Clone>(items: &[T], id: &str) -> AppResult<Vec<T>> {
    if !items.iter().any(|item| item.id() == id) {
        return Err(AppError::not_found(id));
    }
    Ok(items.iter().filter(|item| item.id() != id).cloned().collect())
}

fn prepended<T: Clone>(item: T, items: &[T]) -> Vec<T> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.push(item);
    next.extend_from_slice(items);
    next
}

/// The shared marketplace: task catalog plus every list the admin console
/// moderates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketBoard {
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
    pub submissions: Vec<Submission>,
    pub deposits: Vec<Deposit>,
    pub withdrawals: Vec<WithdrawalRequest>,
    pub disputes: Vec<Dispute>,
    pub categories: Vec<Category>,
    pub kyc_requests: Vec<KycRequest>,
    pub settings: PlatformSettings,
}

impl MarketBoard {
    /// Inserts or refreshes a directory entry. A status set by moderation
    /// wins over the one carried by the session.
    pub fn upsert_user(&self, user: &User) -> Self {
        let users = match self.users.iter().position(|u| u.id == user.id) {
            Some(pos) => {
                let mut users = self.users.clone();
                users[pos] = User {
                    status: self.users[pos].status,
                    ..user.clone()
                };
                users
            }
            None => {
                let mut users = self.users.clone();
                users.push(user.clone());
                users
            }
        };
        Self {
            users,
            ..self.clone()
        }
    }

    pub fn user_status(&self, user_id: &str) -> Option<UserStatus> {
        self.users.iter().find(|u| u.id == user_id).map(|u| u.status)
    }

    pub fn search_users(&self, query: Option<&str>) -> Vec<User> {
        let needle = query.unwrap_or_default().trim().to_lowercase();
        self.users
            .iter()
            .filter(|u| {
                needle.is_empty()
                    || u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn set_user_status(&self, user_id: &str, status: UserStatus) -> AppResult<Self> {
        let users = replaced(&self.users, user_id, |u| User {
            status,
            ..u.clone()
        })?;
        Ok(Self {
            users,
            ..self.clone()
        })
    }

    pub fn find_task(&self, task_id: &str) -> AppResult<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| AppError::not_found(task_id))
    }

    pub fn filter_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    pub fn tasks_of(&self, advertiser_id: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.advertiser_id == advertiser_id)
            .cloned()
            .collect()
    }

    /// Floor for a task reward; unknown categories fall back to the
    /// platform minimum.
    pub fn category_min_price(&self, category: &str) -> Amount {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.min_price)
            .unwrap_or(self.settings.min_task_price)
    }

    pub fn with_task(&self, task: Task) -> Self {
        Self {
            tasks: prepended(task, &self.tasks),
            ..self.clone()
        }
    }

    pub fn apply_task_action(&self, task_id: &str, action: TaskAction) -> AppResult<Self> {
        let tasks = match action.target_status() {
            Some(status) => replaced(&self.tasks, task_id, |t| Task {
                status,
                ..t.clone()
            })?,
            None => without(&self.tasks, task_id)?,
        };
        Ok(Self {
            tasks,
            ..self.clone()
        })
    }

    pub fn find_submission(&self, submission_id: &str) -> AppResult<&Submission> {
        self.submissions
            .iter()
            .find(|s| s.id == submission_id)
            .ok_or_else(|| AppError::not_found(submission_id))
    }

    pub fn submissions_of(&self, worker_id: &str) -> Vec<Submission> {
        self.submissions
            .iter()
            .filter(|s| s.worker_id == worker_id)
            .cloned()
            .collect()
    }

    pub fn submissions_for(&self, task_id: &str) -> Vec<Submission> {
        self.submissions
            .iter()
            .filter(|s| s.task_id == task_id)
            .cloned()
            .collect()
    }

    pub fn with_submission(&self, submission: Submission) -> Self {
        Self {
            submissions: prepended(submission, &self.submissions),
            ..self.clone()
        }
    }

    pub fn set_submission_status(
        &self,
        submission_id: &str,
        status: SubmissionStatus,
    ) -> AppResult<Self> {
        let submissions = replaced(&self.submissions, submission_id, |s| Submission {
            status,
            ..s.clone()
        })?;
        Ok(Self {
            submissions,
            ..self.clone()
        })
    }

    pub fn set_deposit_status(&self, deposit_id: &str, status: ReviewStatus) -> AppResult<Self> {
        let deposits = replaced(&self.deposits, deposit_id, |d| Deposit {
            status,
            ..d.clone()
        })?;
        Ok(Self {
            deposits,
            ..self.clone()
        })
    }

    pub fn with_withdrawal(&self, request: WithdrawalRequest) -> Self {
        Self {
            withdrawals: prepended(request, &self.withdrawals),
            ..self.clone()
        }
    }

    pub fn set_withdrawal_status(
        &self,
        withdrawal_id: &str,
        status: ReviewStatus,
    ) -> AppResult<Self> {
        let withdrawals = replaced(&self.withdrawals, withdrawal_id, |w| WithdrawalRequest {
            status,
            ..w.clone()
        })?;
        Ok(Self {
            withdrawals,
            ..self.clone()
        })
    }

    pub fn set_dispute_status(&self, dispute_id: &str, status: DisputeStatus) -> AppResult<Self> {
        let disputes = replaced(&self.disputes, dispute_id, |d| Dispute {
            status,
            ..d.clone()
        })?;
        Ok(Self {
            disputes,
            ..self.clone()
        })
    }

    pub fn with_kyc_request(&self, request: KycRequest) -> Self {
        Self {
            kyc_requests: prepended(request, &self.kyc_requests),
            ..self.clone()
        }
    }

    /// Only the request changes; the user's own kyc status is left alone.
    pub fn set_kyc_status(&self, request_id: &str, status: KycStatus) -> AppResult<Self> {
        let kyc_requests = replaced(&self.kyc_requests, request_id, |k| KycRequest {
            status,
            ..k.clone()
        })?;
        Ok(Self {
            kyc_requests,
            ..self.clone()
        })
    }

    pub fn add_category(&self, name: &str, min_price: Amount) -> AppResult<(Self, Category)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Category name is required."));
        }
        if min_price <= 0 {
            return Err(AppError::validation("Minimum price must be greater than zero."));
        }
        let category = Category {
            id: format!("c{}", Utc::now().timestamp_millis()),
            name: name.to_string(),
            min_price,
        };
        let mut categories = self.categories.clone();
        categories.push(category.clone());
        Ok((
            Self {
                categories,
                ..self.clone()
            },
            category,
        ))
    }

    pub fn delete_category(&self, category_id: &str) -> AppResult<Self> {
        Ok(Self {
            categories: without(&self.categories, category_id)?,
            ..self.clone()
        })
    }

    pub fn with_settings(&self, settings: PlatformSettings) -> Self {
        Self {
            settings,
            ..self.clone()
        }
    }

    pub fn stats(&self) -> AdminStats {
        AdminStats {
            total_users: self.users.len(),
            active_tasks: self
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Active)
                .count(),
            total_deposits: self
                .deposits
                .iter()
                .filter(|d| d.status == ReviewStatus::Approved)
                .fold(0, |sum: Amount, d| sum.saturating_add(d.amount)),
            total_withdrawals: self
                .withdrawals
                .iter()
                .filter(|w| w.status == ReviewStatus::Approved)
                .fold(0, |sum: Amount, w| sum.saturating_add(w.amount)),
            pending_withdrawals: self
                .withdrawals
                .iter()
                .filter(|w| w.status == ReviewStatus::Pending)
                .count(),
            pending_tasks: self
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Pending)
                .count(),
            pending_kyc: self
                .kyc_requests
                .iter()
                .filter(|k| k.status == KycStatus::Pending)
                .count(),
            pending_deposits: self
                .deposits
                .iter()
                .filter(|d| d.status == ReviewStatus::Pending)
                .count(),
            open_disputes: self
                .disputes
                .iter()
                .filter(|d| d.status == DisputeStatus::Open)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixtures::seed_board;
    use crate::utils::money::naira;

    #[test]
    fn upsert_keeps_moderated_status() {
        let board = seed_board().set_user_status("u1", UserStatus::Banned).unwrap();
        let refreshed = User {
            name: "Alex Renamed".to_string(),
            status: UserStatus::Active,
            ..board.users[0].clone()
        };
        let next = board.upsert_user(&refreshed);
        assert_eq!(next.users.len(), board.users.len());
        assert_eq!(next.user_status("u1"), Some(UserStatus::Banned));
        assert_eq!(next.users[0].name, "Alex Renamed");
    }

    #[test]
    fn upsert_appends_unknown_user() {
        let board = seed_board();
        let newcomer = User {
            id: "345678".to_string(),
            ..board.users[0].clone()
        };
        let next = board.upsert_user(&newcomer);
        assert_eq!(next.users.len(), board.users.len() + 1);
        assert_eq!(board.users.len(), 4);
    }

    #[test]
    fn task_actions_replace_or_remove() {
        let board = seed_board();
        let paused = board.apply_task_action("t1", TaskAction::Pause).unwrap();
        assert_eq!(paused.find_task("t1").unwrap().status, TaskStatus::Paused);
        assert_eq!(board.find_task("t1").unwrap().status, TaskStatus::Active);

        let approved = board.apply_task_action("t5", TaskAction::Approve).unwrap();
        assert_eq!(approved.find_task("t5").unwrap().status, TaskStatus::Active);

        let deleted = board.apply_task_action("t2", TaskAction::Delete).unwrap();
        assert!(deleted.find_task("t2").is_err());
        assert_eq!(deleted.tasks.len(), board.tasks.len() - 1);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let board = seed_board();
        assert_eq!(
            board.set_deposit_status("nope", ReviewStatus::Approved),
            Err(AppError::not_found("nope"))
        );
        assert!(board.apply_task_action("nope", TaskAction::Delete).is_err());
        assert!(board.delete_category("nope").is_err());
    }

    #[test]
    fn kyc_review_does_not_touch_user() {
        let board = seed_board().set_kyc_status("k1", KycStatus::Verified).unwrap();
        assert_eq!(board.kyc_requests[0].status, KycStatus::Verified);
        let sarah = board.users.iter().find(|u| u.id == "u2").unwrap();
        assert_eq!(sarah.kyc_status, KycStatus::Pending);
    }

    #[test]
    fn category_rules() {
        let board = seed_board();
        assert!(board.add_category("  ", naira(10)).is_err());
        assert!(board.add_category("Gaming", 0).is_err());
        let (next, category) = board.add_category("Gaming", naira(30)).unwrap();
        assert!(category.id.starts_with('c'));
        assert_eq!(next.category_min_price("Gaming"), naira(30));
        assert_eq!(next.category_min_price("Unknown"), next.settings.min_task_price);
    }

    #[test]
    fn seeded_stats() {
        let stats = seed_board().stats();
        assert_eq!(stats.total_users, 4);
        assert_eq!(stats.active_tasks, 4);
        assert_eq!(stats.total_deposits, naira(5_000));
        assert_eq!(stats.total_withdrawals, naira(1_000));
        assert_eq!(stats.pending_withdrawals, 1);
        assert_eq!(stats.pending_tasks, 1);
        assert_eq!(stats.pending_kyc, 1);
        assert_eq!(stats.pending_deposits, 2);
        assert_eq!(stats.open_disputes, 1);
    }
}
