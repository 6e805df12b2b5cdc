use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart};
use reqwest::StatusCode;
use tempfile::NamedTempFile;

use crate::entities::submission::{Submission, SubmissionStatus};
use crate::entities::task::{Task, TaskFilter};
use crate::middleware::auth_with_login_access::AuthWithLoginAccess;
use crate::middleware::error::{CtxError, CtxResult};
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::models::view::task::SubmissionResultView;
use crate::services::task_service::{CreateTaskInput, ProofInput, TaskService};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/tasks", get(get_tasks).post(create_task))
        .route("/api/tasks/mine", get(my_tasks))
        .route(
            "/api/tasks/:task_id/submissions",
            get(task_submissions)
                .post(submit_proof)
                .layer(DefaultBodyLimit::max(1024 * 1024 * 8)),
        )
        .route("/api/submissions", get(my_submissions))
        .route("/api/submissions/:submission_id/approve", post(approve))
        .route("/api/submissions/:submission_id/reject", post(reject))
}

async fn get_tasks(
    _auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
    Query(filter): Query<TaskFilter>,
) -> Json<Vec<Task>> {
    Json(TaskService::new(&state).feed(&filter).await)
}

async fn my_tasks(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<Vec<Task>>> {
    let tasks = TaskService::new(&state)
        .my_tasks(&auth_data.session)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(tasks))
}

async fn create_task(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<CreateTaskInput>,
) -> CtxResult<Response> {
    let view = TaskService::new(&state)
        .create_task(auth_data.session_id(), input)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

#[derive(TryFromMultipart)]
pub struct ProofForm {
    pub proof_text: Option<String>,
    #[form_data(limit = "unlimited")]
    pub proof_image: Option<FieldData<NamedTempFile>>,
}

async fn submit_proof(
    Path(task_id): Path<String>,
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
    TypedMultipart(form): TypedMultipart<ProofForm>,
) -> CtxResult<Json<SubmissionResultView>> {
    // browsers send an empty file part when nothing was picked
    let proof_image = form
        .proof_image
        .and_then(|file| file.metadata.file_name)
        .filter(|name| !name.is_empty());
    let proof = ProofInput {
        proof_text: form.proof_text.unwrap_or_default(),
        proof_image,
    };
    let view = TaskService::new(&state)
        .submit_proof(&auth_data.session, &task_id, proof)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(view))
}

async fn task_submissions(
    Path(task_id): Path<String>,
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<Vec<Submission>>> {
    let submissions = TaskService::new(&state)
        .submissions_for_task(&auth_data.session, &task_id)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(submissions))
}

async fn my_submissions(
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<Vec<Submission>>> {
    let submissions = TaskService::new(&state)
        .my_submissions(&auth_data.session)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(submissions))
}

async fn review(
    state: &CtxState,
    auth_data: &AuthWithLoginAccess,
    submission_id: &str,
    status: SubmissionStatus,
) -> CtxResult<Json<Submission>> {
    let submission = TaskService::new(state)
        .review_submission(&auth_data.session, submission_id, status)
        .await
        .map_err(CtxError::from(&auth_data.ctx))?;
    Ok(Json(submission))
}

async fn approve(
    Path(submission_id): Path<String>,
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<Submission>> {
    review(&state, &auth_data, &submission_id, SubmissionStatus::Approved).await
}

async fn reject(
    Path(submission_id): Path<String>,
    auth_data: AuthWithLoginAccess,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<Submission>> {
    review(&state, &auth_data, &submission_id, SubmissionStatus::Rejected).await
}
