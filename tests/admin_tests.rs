mod helpers;

use microgigs_server::entities::category::Category;
use microgigs_server::entities::dispute::{Dispute, DisputeStatus};
use microgigs_server::entities::kyc_request::KycRequest;
use microgigs_server::entities::money_movement::{Deposit, ReviewStatus};
use microgigs_server::entities::platform_settings::PlatformSettings;
use microgigs_server::entities::task::{Task, TaskStatus};
use microgigs_server::entities::user::{KycStatus, User, UserStatus};
use microgigs_server::models::view::admin::AdminStats;
use serde_json::{json, Value};

use crate::helpers::{another_client, error_message, login_admin, login_as};

test_with_server!(stats_reflect_seeded_board, |server, ctx_state| {
    login_admin(&server).await;
    let stats = server.get("/api/admin/stats").await.json::<AdminStats>();
    assert_eq!(stats.total_users, 4);
    assert_eq!(stats.active_tasks, 4);
    assert_eq!(stats.total_deposits, 500_000);
    assert_eq!(stats.total_withdrawals, 100_000);
    assert_eq!(stats.pending_withdrawals, 1);
    assert_eq!(stats.pending_tasks, 1);
    assert_eq!(stats.pending_kyc, 1);
    assert_eq!(stats.pending_deposits, 2);
    assert_eq!(stats.open_disputes, 1);
});

test_with_server!(regular_sessions_cannot_moderate, |server, ctx_state| {
    login_as(&server, "ADVERTISER", None).await;
    server.get("/api/admin/stats").await.assert_status_unauthorized();
    server
        .post("/api/admin/deposits/d1/status")
        .json(&json!({ "status": "APPROVED" }))
        .await
        .assert_status_unauthorized();
    assert_eq!(
        ctx_state.board.read().await.deposits[0].status,
        ReviewStatus::Pending
    );
});

test_with_server!(user_search_and_status, |server, ctx_state| {
    login_admin(&server).await;

    let found = server
        .get("/api/admin/users?search=BRAND")
        .await
        .json::<Vec<User>>();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "a1");

    let banned = server
        .post("/api/admin/users/a1/status")
        .json(&json!({ "status": "BANNED" }))
        .await
        .json::<User>();
    assert_eq!(banned.status, UserStatus::Banned);

    server
        .post("/api/admin/users/nobody/status")
        .json(&json!({ "status": "ACTIVE" }))
        .await
        .assert_status_not_found();
});

test_with_server!(task_actions_move_and_delete, |server, ctx_state| {
    login_admin(&server).await;

    let paused = server
        .post("/api/admin/tasks/t1/action")
        .json(&json!({ "action": "PAUSE" }))
        .await
        .json::<Task>();
    assert_eq!(paused.status, TaskStatus::Paused);

    server
        .post("/api/admin/tasks/t2/action")
        .json(&json!({ "action": "DELETE" }))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    let tasks = server.get("/api/admin/tasks").await.json::<Vec<Task>>();
    assert_eq!(tasks.len(), 4);
    assert!(tasks.iter().all(|t| t.id != "t2"));

    let worker = another_client(&ctx_state);
    login_as(&worker, "WORKER", None).await;
    let feed = worker.get("/api/tasks").await.json::<Vec<Task>>();
    assert_eq!(feed.len(), 2);
});

test_with_server!(deposit_review_needs_final_status, |server, ctx_state| {
    login_admin(&server).await;

    let pending = server
        .post("/api/admin/deposits/d1/status")
        .json(&json!({ "status": "PENDING" }))
        .await;
    pending.assert_status_bad_request();
    assert_eq!(
        error_message(&pending.json::<Value>()),
        "Status must be APPROVED or REJECTED."
    );

    let approved = server
        .post("/api/admin/deposits/d1/status")
        .json(&json!({ "status": "APPROVED" }))
        .await
        .json::<Deposit>();
    assert_eq!(approved.status, ReviewStatus::Approved);

    let stats = server.get("/api/admin/stats").await.json::<AdminStats>();
    assert_eq!(stats.total_deposits, 5_500_000);
    assert_eq!(stats.pending_deposits, 1);

    server
        .post("/api/admin/deposits/d99/status")
        .json(&json!({ "status": "APPROVED" }))
        .await
        .assert_status_not_found();
});

test_with_server!(dispute_resolution, |server, ctx_state| {
    login_admin(&server).await;
    let resolved = server
        .post("/api/admin/disputes/dp1/status")
        .json(&json!({ "status": "RESOLVED_WORKER" }))
        .await
        .json::<Dispute>();
    assert_eq!(resolved.status, DisputeStatus::ResolvedWorker);

    let disputes = server.get("/api/admin/disputes").await.json::<Vec<Dispute>>();
    assert!(disputes.iter().all(|d| d.status != DisputeStatus::Open));
});

test_with_server!(kyc_review_leaves_user_record, |server, ctx_state| {
    login_admin(&server).await;
    let verified = server
        .post("/api/admin/kyc/k1/status")
        .json(&json!({ "status": "VERIFIED" }))
        .await
        .json::<KycRequest>();
    assert_eq!(verified.status, KycStatus::Verified);

    let sarah = server
        .get("/api/admin/users?search=sarah")
        .await
        .json::<Vec<User>>();
    assert_eq!(sarah[0].kyc_status, KycStatus::Pending);

    let requests = server.get("/api/admin/kyc").await.json::<Vec<KycRequest>>();
    assert_eq!(requests.len(), 1);
});

test_with_server!(category_crud, |server, ctx_state| {
    login_admin(&server).await;

    let created = server
        .post("/api/admin/categories")
        .json(&json!({ "name": "Reviews", "min_price": 30_000 }))
        .await;
    created.assert_status(axum::http::StatusCode::CREATED);
    let category = created.json::<Category>();
    assert!(category.id.starts_with('c'));
    assert_eq!(category.name, "Reviews");

    let nameless = server
        .post("/api/admin/categories")
        .json(&json!({ "name": "  ", "min_price": 30_000 }))
        .await;
    nameless.assert_status_bad_request();
    assert_eq!(
        error_message(&nameless.json::<Value>()),
        "Category name is required."
    );

    let free = server
        .post("/api/admin/categories")
        .json(&json!({ "name": "Free", "min_price": 0 }))
        .await;
    assert_eq!(
        error_message(&free.json::<Value>()),
        "Minimum price must be greater than zero."
    );

    server
        .delete(&format!("/api/admin/categories/{}", category.id))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);
    let categories = server
        .get("/api/admin/categories")
        .await
        .json::<Vec<Category>>();
    assert_eq!(categories.len(), 5);

    server
        .delete("/api/admin/categories/c404")
        .await
        .assert_status_not_found();
});

test_with_server!(settings_drive_withdrawal_minimum, |server, ctx_state| {
    login_admin(&server).await;
    let settings = PlatformSettings {
        min_withdrawal_limit: 200_000,
        ..server.get("/api/admin/settings").await.json::<PlatformSettings>()
    };
    let updated = server
        .post("/api/admin/settings")
        .json(&settings)
        .await
        .json::<PlatformSettings>();
    assert_eq!(updated.min_withdrawal_limit, 200_000);

    let worker = another_client(&ctx_state);
    login_as(&worker, "WORKER", None).await;
    let response = worker
        .post("/api/wallet/withdraw")
        .json(&json!({ "amount": 150_000, "method": "BANK_TRANSFER", "details": "" }))
        .await;
    response.assert_status_bad_request();
    assert_eq!(
        error_message(&response.json::<Value>()),
        "Minimum withdrawal is ₦2,000"
    );
});

test_with_server!(invalid_settings_are_refused, |server, ctx_state| {
    login_admin(&server).await;
    let settings = PlatformSettings {
        min_withdrawal_limit: 0,
        ..PlatformSettings::default()
    };
    server
        .post("/api/admin/settings")
        .json(&settings)
        .await
        .assert_status_bad_request();
});
