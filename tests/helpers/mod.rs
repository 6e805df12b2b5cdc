pub mod test_with_server;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::{TestServer, TestServerConfig};
use chrono::TimeDelta;
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use microgigs_server::interfaces::generative_model::{GenerateRequest, GenerativeModelInterface};
use microgigs_server::middleware::mw_ctx::{CtxState, SimulatedLatency};
use microgigs_server::models::view::session::SessionView;
use microgigs_server::utils::{
    admin_credentials::AdminCredentials, fixtures, jwt::JWT,
    memory_session_store::MemorySessionStore, origin_checks::RepeatSubmissionCheck,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

pub const ADMIN_EMAIL: &str = "admin@microgigs.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Model stand-in answering every prompt kind with a fixed reply.
pub struct ScriptedModel;

#[async_trait]
impl GenerativeModelInterface for ScriptedModel {
    async fn generate(&self, request: GenerateRequest) -> Result<Option<String>, String> {
        let reply = match (request.json_response, request.inline_image.is_some()) {
            (true, true) => {
                r#"{"isValid": true, "confidence": 87, "feedback": "Follow confirmed"}"#
            }
            (true, false) => r#"```json
{"riskLevel": "MEDIUM", "reason": "Generic wording"}
```"#,
            (false, _) => "Follow our page and send a screenshot of the follow button.",
        };
        Ok(Some(reply.to_string()))
    }
}

#[derive(Deserialize, Debug)]
pub struct SignedIn {
    pub token: String,
    pub session: SessionView,
}

/// In-memory state over the seeded board with deterministic duplicate
/// checks and the scripted model.
pub fn test_ctx_state(latency: SimulatedLatency) -> Arc<CtxState> {
    Arc::new(CtxState {
        is_development: true,
        jwt: JWT::new("secret".to_string(), TimeDelta::days(1)),
        admin_credentials: AdminCredentials::new(ADMIN_EMAIL, ADMIN_PASSWORD)
            .expect("admin credentials"),
        sessions: RwLock::new(HashMap::new()),
        board: RwLock::new(fixtures::seed_board()),
        session_store: Arc::new(MemorySessionStore::new()),
        origin_check: Arc::new(RepeatSubmissionCheck),
        ai_model: Some(Arc::new(ScriptedModel)),
        latency,
    })
}

/// A client over the given state, keeping its own cookie jar.
pub fn another_client(ctx_state: &Arc<CtxState>) -> TestServer {
    TestServer::new_with_config(
        microgigs_server::init::main_router(ctx_state),
        TestServerConfig {
            transport: None,
            save_cookies: true,
            expect_success_by_default: false,
            restrict_requests_with_http_schema: false,
            default_content_type: None,
            default_scheme: None,
        },
    )
    .expect("Failed to create test server")
}

#[allow(dead_code)]
pub async fn login_as(server: &TestServer, role: &str, overrides: Option<Value>) -> SignedIn {
    let response = server
        .post("/api/login")
        .json(&json!({ "role": role, "overrides": overrides }))
        .await;
    response.assert_status_ok();
    response.json::<SignedIn>()
}

#[allow(dead_code)]
pub async fn login_admin(server: &TestServer) -> SignedIn {
    let response = server
        .post("/api/admin/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .await;
    response.assert_status_ok();
    response.json::<SignedIn>()
}

#[allow(dead_code)]
pub async fn register_as(server: &TestServer, role: &str) -> SignedIn {
    let username = format!("user_{}", (1000..9999).fake::<u32>());
    let phone = format!("080{}", (10_000_000..99_999_999).fake::<u32>());
    let response = server
        .post("/api/register")
        .json(&json!({
            "name": Name().fake::<String>(),
            "email": FreeEmail().fake::<String>(),
            "role": role,
            "username": username,
            "phone_number": phone,
        }))
        .await;
    response.assert_status_ok();
    response.json::<SignedIn>()
}

#[allow(dead_code)]
pub fn error_message(body: &Value) -> &str {
    body["error"].as_str().unwrap_or_default()
}
