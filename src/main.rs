use std::sync::Arc;

use anyhow::Context;
use gmdb::{AppState, config::Config, db, routes, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,gmdb=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::load().context("loading configuration")?);
    tracing::info!(
        app = %config.app.name,
        version = %config.app.version,
        environment = %config.app.environment,
        "starting"
    );

    let store = db::connect(&config.database).await.context("connecting to database")?;
    store.migrate().await.context("running migrations")?;
    tracing::info!("migrations applied");

    seed::seed_if_empty(&store).await.context("seeding catalog")?;

    let state = Arc::new(AppState::new(config.clone(), store.clone()));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| format!("binding {}:{}", config.server.host, config.server.port))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("listener stopped, closing database");
    store.close().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "ctrl-c handler failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "sigterm handler failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
