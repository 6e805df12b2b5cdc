use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::entities::submission::{Submission, SubmissionStatus};
use crate::entities::task::{ProofType, Task, TaskFilter, TaskStatus};
use crate::entities::transaction::{Transaction, TransactionStatus, TransactionType};
use crate::entities::user::UserRole;
use crate::interfaces::origin_check::{OriginCheckInterface, SubmissionAttempt};
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::mw_ctx::CtxState;
use crate::models::market_board::MarketBoard;
use crate::models::session::Session;
use crate::models::view::task::{CreatedTaskView, SubmissionResultView};
use crate::utils::money::{format_naira, Amount, AMOUNT_TOO_LARGE_MESSAGE, MAX_AMOUNT};
use crate::utils::validate_utils::trim_string;

pub const PLATFORM_FEE_PERCENT: Amount = 10;

pub const DUPLICATE_ORIGIN_MESSAGE: &str =
    "Duplicate IP detected. You have already attempted this task or another account on your network has.";
pub const MISSING_SCREENSHOT_MESSAGE: &str = "Please upload a screenshot proof.";
pub const PROOF_ACCEPTED_MESSAGE: &str = "Proof submitted successfully! Earning pending approval.";

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateTaskInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub platform: String,
    #[validate(range(min = 1, max = MAX_AMOUNT))]
    pub reward: Amount,
    #[validate(range(min = 1))]
    pub total_slots: u32,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub proof_type: ProofType,
    pub expiry_date: Option<NaiveDate>,
}

/// Subtotal, platform fee and grand total of funding a task.
pub fn task_cost(reward: Amount, slots: u32) -> AppResult<(Amount, Amount, Amount)> {
    let too_large = || AppError::validation(AMOUNT_TOO_LARGE_MESSAGE);
    let subtotal = reward.checked_mul(Amount::from(slots)).ok_or_else(too_large)?;
    let fee = subtotal
        .checked_mul(PLATFORM_FEE_PERCENT)
        .ok_or_else(too_large)?
        / 100;
    let total = subtotal.checked_add(fee).ok_or_else(too_large)?;
    Ok((subtotal, fee, total))
}

pub fn task_created(
    session: &Session,
    board: &MarketBoard,
    input: CreateTaskInput,
) -> AppResult<(Session, MarketBoard, CreatedTaskView)> {
    session.user.require_role(UserRole::Advertiser)?;

    let min_price = board.category_min_price(&input.category);
    if input.reward < min_price {
        return Err(AppError::validation(format!(
            "Minimum reward for {} is {}",
            input.category,
            format_naira(min_price)
        )));
    }
    let (_, _, total_cost) = task_cost(input.reward, input.total_slots)?;
    if total_cost > session.balance() {
        return Err(AppError::validation("Insufficient funds."));
    }

    let task = Task {
        id: format!("t-{}", Uuid::new_v4().simple()),
        advertiser_id: session.user.id.clone(),
        title: input.title,
        description: input.description,
        category: input.category,
        platform: input.platform,
        reward: input.reward,
        total_slots: input.total_slots,
        filled_slots: 0,
        status: TaskStatus::Pending,
        requirements: input.requirements,
        created_at: Utc::now(),
        expiry_date: input.expiry_date,
        proof_type: Some(input.proof_type),
    };
    let next = session.with_transaction(Transaction::new(
        -total_cost,
        TransactionType::Spend,
        TransactionStatus::Success,
        format!("Task funding: {}", task.title),
    ))?;
    let view = CreatedTaskView {
        task: task.clone(),
        total_cost,
        balance: next.balance(),
    };
    Ok((next, board.with_task(task), view))
}

/// Gating applied to a proof before it is accepted, in this order:
/// the task must take submissions, the origin must be fresh and a
/// screenshot task needs a file.
pub fn check_proof(
    session: &Session,
    board: &MarketBoard,
    origin_check: &(dyn OriginCheckInterface + Send + Sync),
    task_id: &str,
    has_file: bool,
) -> AppResult<()> {
    session.user.require_role(UserRole::Worker)?;
    let task = board.find_task(task_id)?;
    if task.status != TaskStatus::Active {
        return Err(AppError::validation("This task is not accepting submissions."));
    }

    let attempt = SubmissionAttempt {
        task_id,
        worker_id: &session.user.id,
        existing: &board.submissions,
    };
    if origin_check.is_duplicate_origin(&attempt) {
        warn!("duplicate origin worker={} task={task_id}", session.user.id);
        return Err(AppError::validation(DUPLICATE_ORIGIN_MESSAGE));
    }
    if task.requires_screenshot() && !has_file {
        return Err(AppError::validation(MISSING_SCREENSHOT_MESSAGE));
    }
    Ok(())
}

/// Gating repeated under the board write lock, after the simulated delay,
/// so concurrent attempts cannot both be recorded.
pub fn recheck_proof(
    session: &Session,
    board: &MarketBoard,
    origin_check: &(dyn OriginCheckInterface + Send + Sync),
    task_id: &str,
) -> AppResult<()> {
    let task = board.find_task(task_id)?;
    if task.status != TaskStatus::Active {
        return Err(AppError::validation("This task is not accepting submissions."));
    }
    let attempt = SubmissionAttempt {
        task_id,
        worker_id: &session.user.id,
        existing: &board.submissions,
    };
    if origin_check.is_duplicate_on_record(&attempt) {
        warn!("duplicate origin on record worker={} task={task_id}", session.user.id);
        return Err(AppError::validation(DUPLICATE_ORIGIN_MESSAGE));
    }
    Ok(())
}

/// The submission's task, provided the caller owns it.
fn owned_task<'b>(board: &'b MarketBoard, owner_id: &str, task_id: &str) -> AppResult<&'b Task> {
    let task = board.find_task(task_id)?;
    if task.advertiser_id != owner_id {
        return Err(AppError::AuthorizationFail {
            required: "task owner".to_string(),
        });
    }
    Ok(task)
}

pub fn submission_reviewed(
    session: &Session,
    board: &MarketBoard,
    submission_id: &str,
    status: SubmissionStatus,
) -> AppResult<(MarketBoard, Submission)> {
    session.user.require_role(UserRole::Advertiser)?;
    let submission = board.find_submission(submission_id)?;
    owned_task(board, &session.user.id, &submission.task_id)?;
    let next = board.set_submission_status(submission_id, status)?;
    let reviewed = next.find_submission(submission_id)?.clone();
    Ok((next, reviewed))
}

pub struct ProofInput {
    pub proof_text: String,
    /// File name of the uploaded screenshot, if any.
    pub proof_image: Option<String>,
}

pub struct TaskService<'a> {
    state: &'a CtxState,
}

impl<'a> TaskService<'a> {
    pub fn new(state: &'a CtxState) -> Self {
        Self { state }
    }

    pub async fn feed(&self, filter: &TaskFilter) -> Vec<Task> {
        self.state.board.read().await.filter_tasks(filter)
    }

    pub async fn my_tasks(&self, session: &Session) -> AppResult<Vec<Task>> {
        session.user.require_role(UserRole::Advertiser)?;
        Ok(self.state.board.read().await.tasks_of(&session.user.id))
    }

    pub async fn my_submissions(&self, session: &Session) -> AppResult<Vec<Submission>> {
        session.user.require_role(UserRole::Worker)?;
        Ok(self.state.board.read().await.submissions_of(&session.user.id))
    }

    pub async fn create_task(
        &self,
        session_id: &str,
        input: CreateTaskInput,
    ) -> AppResult<CreatedTaskView> {
        let view = self
            .state
            .transition(session_id, |session, board| task_created(session, board, input))
            .await?;
        info!(
            "task created id={} cost={}",
            view.task.id, view.total_cost
        );
        Ok(view)
    }

    pub async fn submit_proof(
        &self,
        session: &Session,
        task_id: &str,
        proof: ProofInput,
    ) -> AppResult<SubmissionResultView> {
        {
            let board = self.state.board.read().await;
            check_proof(
                session,
                &board,
                self.state.origin_check.as_ref(),
                task_id,
                proof.proof_image.is_some(),
            )?;
        }

        self.state.latency.standard().await;

        let submission = Submission::pending(
            task_id,
            &session.user.id,
            proof.proof_text,
            proof.proof_image,
        );
        let submission = self
            .state
            .update_board(|board| {
                recheck_proof(session, board, self.state.origin_check.as_ref(), task_id)?;
                Ok((board.with_submission(submission.clone()), submission))
            })
            .await?;
        info!("submission {} for task {task_id}", submission.id);
        Ok(SubmissionResultView {
            message: PROOF_ACCEPTED_MESSAGE.to_string(),
            submission,
        })
    }

    pub async fn submissions_for_task(
        &self,
        session: &Session,
        task_id: &str,
    ) -> AppResult<Vec<Submission>> {
        session.user.require_role(UserRole::Advertiser)?;
        let board = self.state.board.read().await;
        owned_task(&board, &session.user.id, task_id)?;
        Ok(board.submissions_for(task_id))
    }

    pub async fn review_submission(
        &self,
        session: &Session,
        submission_id: &str,
        status: SubmissionStatus,
    ) -> AppResult<Submission> {
        self.state
            .update_board(|board| submission_reviewed(session, board, submission_id, status))
            .await
    }
}
