use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use reqwest::StatusCode;
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use crate::{
    middleware::mw_ctx::CtxState,
    routes::{admin, ai, auth_routes, notifications, tasks, wallet},
};

pub fn main_router(ctx_state: &Arc<CtxState>) -> Router {
    Router::new()
        .route("/hc", get(get_hc))
        .merge(auth_routes::routes(ctx_state.is_development))
        .merge(notifications::routes())
        .merge(tasks::routes())
        .merge(wallet::routes())
        .merge(admin::routes())
        .merge(ai::routes())
        .with_state(ctx_state.clone())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CookieManagerLayer::new()),
        )
}

async fn get_hc() -> Response {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    (StatusCode::OK, format!("v{}", VERSION)).into_response()
}
