use std::net::{Ipv4Addr, SocketAddr};

use microgigs_server::config::AppConfig;
use microgigs_server::init;
use microgigs_server::middleware::mw_ctx;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("microgigs_server=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();

    let _sentry_guard = config.sentry_project_link.as_deref().map(|link| {
        sentry::init((
            link,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let ctx_state = mw_ctx::create_ctx_state(&config)?;
    ctx_state.restore_sessions().await;

    let routes_all = init::main_router(&ctx_state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    info!("->> LISTENING on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| e.to_string())?;

    axum::serve(listener, routes_all.into_make_service())
        .await
        .map_err(|e| e.to_string())
}
