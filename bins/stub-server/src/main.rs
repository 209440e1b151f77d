//! BusinessOS stub backend
//!
//! Serves the `/api` routes and the `/auth/v1` token endpoint from memory,
//! preloaded with demo data. Sign in as `admin@businessos.dev` / `admin123`.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use businessos_shared::{AppConfig, JwtService};
use businessos_stub::seed::DEMO_EMAIL;
use businessos_stub::{StubState, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "businessos=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let jwt = JwtService::new(&config.stub.jwt_secret, config.stub.access_token_expiry_secs);
    let state = StubState::demo(jwt, &config.supabase.anon_key);
    info!(
        users = state.store.users.len(),
        budgets = state.store.budgets.len(),
        demo_account = DEMO_EMAIL,
        "Demo data loaded"
    );

    let addr = format!("{}:{}", config.stub.host, config.stub.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Stub backend listening on {}", addr);

    serve(listener, state).await?;

    Ok(())
}
