use promptlab_api::bootstrap::app_context::AppContext;
use promptlab_api::bootstrap::config::Config;
use promptlab_api::bootstrap::seed::seed_initial_data;
use promptlab_api::presentation::http::build_router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promptlab_api=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env()?;
    let addr = cfg.bind_addr();
    let ctx = AppContext::new(cfg);

    if ctx.cfg.seed_data {
        let seeded = seed_initial_data(&ctx)?;
        tracing::info!(count = seeded, "seeded_sample_prompts");
    }

    let app = build_router(ctx)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = ?err, "failed_to_listen_for_shutdown_signal");
    }
    tracing::info!("shutting_down");
}
