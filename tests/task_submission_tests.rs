mod helpers;

use std::future::IntoFuture;
use std::time::Duration;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use microgigs_server::entities::submission::{Submission, SubmissionStatus};
use microgigs_server::entities::task::{Task, TaskStatus};
use microgigs_server::entities::transaction::{Transaction, TransactionType};
use microgigs_server::middleware::mw_ctx::SimulatedLatency;
use microgigs_server::models::view::task::{CreatedTaskView, SubmissionResultView};
use serde_json::{json, Value};

use crate::helpers::{another_client, error_message, login_admin, login_as, test_ctx_state};

fn task_input(reward: i64, slots: u32, proof_type: &str) -> Value {
    json!({
        "title": "Like our Facebook page",
        "description": "Like the page and comment on the pinned post.",
        "category": "Social Media",
        "platform": "Facebook",
        "reward": reward,
        "total_slots": slots,
        "requirements": ["Screenshot of like"],
        "proof_type": proof_type,
    })
}

fn screenshot_form() -> MultipartForm {
    MultipartForm::new()
        .add_text("proof_text", "@alex_worker")
        .add_part(
            "proof_image",
            Part::bytes(vec![137, 80, 78, 71])
                .file_name("proof.png")
                .mime_type("image/png"),
        )
}

async fn login_brand(server: &TestServer, id: &str) {
    login_as(
        server,
        "ADVERTISER",
        Some(json!({ "id": id, "name": "Brand", "balance": 1_000_000 })),
    )
    .await;
}

test_with_server!(create_task_debits_advertiser, |server, ctx_state| {
    login_brand(&server, "a9").await;

    let response = server
        .post("/api/tasks")
        .json(&task_input(5_000, 100, "SCREENSHOT"))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let view = response.json::<CreatedTaskView>();
    assert_eq!(view.total_cost, 550_000);
    assert_eq!(view.balance, 450_000);
    assert_eq!(view.task.status, TaskStatus::Pending);
    assert_eq!(view.task.filled_slots, 0);
    assert_eq!(view.task.advertiser_id, "a9");

    let history = server.get("/api/wallet/history").await.json::<Vec<Transaction>>();
    assert_eq!(history[0].r#type, TransactionType::Spend);
    assert_eq!(history[0].amount, -550_000);
    assert_eq!(history[0].description, "Task funding: Like our Facebook page");

    let mine = server.get("/api/tasks/mine").await.json::<Vec<Task>>();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, view.task.id);
});

test_with_server!(create_task_checks_floor_and_funds, |server, ctx_state| {
    login_brand(&server, "a9").await;

    let cheap = server
        .post("/api/tasks")
        .json(&task_input(1_000, 10, "TEXT"))
        .await;
    cheap.assert_status_bad_request();
    assert_eq!(
        error_message(&cheap.json::<Value>()),
        "Minimum reward for Social Media is ₦20"
    );

    let too_big = server
        .post("/api/tasks")
        .json(&task_input(5_000, 1_000, "TEXT"))
        .await;
    too_big.assert_status_bad_request();
    assert_eq!(error_message(&too_big.json::<Value>()), "Insufficient funds.");

    let balance = server.get("/api/wallet/balance").await.json::<Value>();
    assert_eq!(balance["balance"], 1_000_000);
});

test_with_server!(workers_cannot_post_tasks, |server, ctx_state| {
    login_as(&server, "WORKER", None).await;
    server
        .post("/api/tasks")
        .json(&task_input(5_000, 10, "TEXT"))
        .await
        .assert_status_forbidden();
});

test_with_server!(feed_filters_tasks, |server, ctx_state| {
    login_as(&server, "WORKER", None).await;

    let feed = server.get("/api/tasks").await.json::<Vec<Task>>();
    assert_eq!(feed.len(), 4);
    assert!(feed.iter().all(|t| t.status == TaskStatus::Active));

    let writing = server
        .get("/api/tasks?category=Writing")
        .await
        .json::<Vec<Task>>();
    assert_eq!(writing.len(), 1);
    assert_eq!(writing[0].id, "t4");

    let search = server
        .get("/api/tasks?category=All&search=INSTAGRAM")
        .await
        .json::<Vec<Task>>();
    assert_eq!(search.len(), 1);
    assert_eq!(search[0].id, "t1");

    let pending = server
        .get("/api/tasks?status=PENDING")
        .await
        .json::<Vec<Task>>();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, "t5");
});

test_with_server!(proof_gating_order, |server, ctx_state| {
    login_as(&server, "WORKER", None).await;

    let no_file = server
        .post("/api/tasks/t1/submissions")
        .multipart(MultipartForm::new().add_text("proof_text", "done"))
        .await;
    no_file.assert_status_bad_request();
    assert_eq!(
        error_message(&no_file.json::<Value>()),
        "Please upload a screenshot proof."
    );
    assert!(ctx_state.board.read().await.submissions.is_empty());

    let accepted = server
        .post("/api/tasks/t1/submissions")
        .multipart(screenshot_form())
        .await;
    accepted.assert_status_ok();
    let view = accepted.json::<SubmissionResultView>();
    assert_eq!(
        view.message,
        "Proof submitted successfully! Earning pending approval."
    );
    assert_eq!(view.submission.status, SubmissionStatus::Pending);
    assert_eq!(view.submission.proof_image.as_deref(), Some("proof.png"));

    let repeat = server
        .post("/api/tasks/t1/submissions")
        .multipart(screenshot_form())
        .await;
    repeat.assert_status_bad_request();
    assert_eq!(
        error_message(&repeat.json::<Value>()),
        "Duplicate IP detected. You have already attempted this task or another account on your network has."
    );

    let mine = server.get("/api/submissions").await.json::<Vec<Submission>>();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].task_id, "t1");
});

#[tokio::test(flavor = "multi_thread")]
#[serial_test::serial]
async fn concurrent_proofs_record_once() {
    let ctx_state = test_ctx_state(SimulatedLatency::new(Duration::from_millis(300)));
    let server = another_client(&ctx_state);
    login_as(&server, "WORKER", None).await;

    let (first, second) = tokio::join!(
        server
            .post("/api/tasks/t1/submissions")
            .multipart(screenshot_form())
            .into_future(),
        server
            .post("/api/tasks/t1/submissions")
            .multipart(screenshot_form())
            .into_future(),
    );

    let mut statuses = vec![first.status_code().as_u16(), second.status_code().as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![200, 400]);
    let refused = if first.status_code().is_success() { second } else { first };
    assert_eq!(
        error_message(&refused.json::<Value>()),
        "Duplicate IP detected. You have already attempted this task or another account on your network has."
    );

    let board = ctx_state.board.read().await;
    assert_eq!(board.submissions_for("t1").len(), 1);
}

test_with_server!(inactive_or_unknown_tasks_refuse_proof, |server, ctx_state| {
    login_as(&server, "WORKER", None).await;

    let pending = server
        .post("/api/tasks/t5/submissions")
        .multipart(screenshot_form())
        .await;
    pending.assert_status_bad_request();
    assert_eq!(
        error_message(&pending.json::<Value>()),
        "This task is not accepting submissions."
    );

    server
        .post("/api/tasks/t404/submissions")
        .multipart(screenshot_form())
        .await
        .assert_status_not_found();
});

test_with_server!(advertiser_reviews_own_task_submissions, |server, ctx_state| {
    login_brand(&server, "a9").await;
    let created = server
        .post("/api/tasks")
        .json(&task_input(5_000, 10, "TEXT"))
        .await
        .json::<CreatedTaskView>();
    let task_id = created.task.id;

    let admin = another_client(&ctx_state);
    login_admin(&admin).await;
    let approved = admin
        .post(&format!("/api/admin/tasks/{task_id}/action"))
        .json(&json!({ "action": "APPROVE" }))
        .await
        .json::<Task>();
    assert_eq!(approved.status, TaskStatus::Active);

    let worker = another_client(&ctx_state);
    login_as(&worker, "WORKER", None).await;
    let feed = worker.get("/api/tasks").await.json::<Vec<Task>>();
    assert!(feed.iter().any(|t| t.id == task_id));

    // text proof needs no file
    let submitted = worker
        .post(&format!("/api/tasks/{task_id}/submissions"))
        .multipart(MultipartForm::new().add_text("proof_text", "Liked as Alex"))
        .await;
    submitted.assert_status_ok();
    let submission_id = submitted.json::<SubmissionResultView>().submission.id;

    let listed = server
        .get(&format!("/api/tasks/{task_id}/submissions"))
        .await
        .json::<Vec<Submission>>();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].proof_text, "Liked as Alex");

    let other = another_client(&ctx_state);
    login_brand(&other, "a8").await;
    other
        .post(&format!("/api/submissions/{submission_id}/approve"))
        .await
        .assert_status_forbidden();

    let reviewed = server
        .post(&format!("/api/submissions/{submission_id}/approve"))
        .await;
    reviewed.assert_status_ok();
    assert_eq!(
        reviewed.json::<Submission>().status,
        SubmissionStatus::Approved
    );

    let rejected = server
        .post(&format!("/api/submissions/{submission_id}/reject"))
        .await
        .json::<Submission>();
    assert_eq!(rejected.status, SubmissionStatus::Rejected);
});
