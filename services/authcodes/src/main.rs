use anyhow::Context as _;
use sea_orm::{ConnectOptions, Database};
use tracing::info;

use linkcode_authcodes::config::AuthCodesConfig;
use linkcode_authcodes::router::build_router;
use linkcode_authcodes::state::AppState;
use linkcode_authcodes_migration::{Migrator, MigratorTrait};
use linkcode_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AuthCodesConfig::from_env()?;

    let mut opts = ConnectOptions::new(config.database_url.clone());
    if let Some(schema) = &config.database_schema {
        opts.set_schema_search_path(schema.clone());
    }
    let db = Database::connect(opts)
        .await
        .context("failed to connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("failed to apply migrations")?;
        info!("migrations applied");
    }

    let router = build_router(AppState::new(db));
    let addr = format!("0.0.0.0:{}", config.authcodes_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("authcodes service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
