use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;
use clap::Parser;
use folio_admin::{
    AppConfig, AppState, AuditLog, ContentStore, FileAuditLog, FileContentStore, LocalAuthProvider,
    MemoryAuditLog, MemoryContentStore, build_router,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::parse();

    let (store, audit): (Arc<dyn ContentStore>, Arc<dyn AuditLog>) = match &config.data_dir {
        Some(dir) => {
            info!(data_dir = %dir.display(), "storage backend: files");
            let store = FileContentStore::open(dir).context("failed to open content snapshot")?;
            let audit = FileAuditLog::open(dir).context("failed to open activity journal")?;
            (Arc::new(store), Arc::new(audit))
        }
        None => {
            info!("storage backend: memory");
            (Arc::new(MemoryContentStore::new()), Arc::new(MemoryAuditLog::new()))
        }
    };

    let auth = LocalAuthProvider::with_admin(
        &config.admin_email,
        &config.admin_password,
        config.bcrypt_cost,
    )
    .context("failed to seed admin account")?
    .with_session_ttl(Duration::seconds(config.session_ttl_secs));

    let state = AppState::new(store, audit, Arc::new(auth))
        .with_activity_limit(config.activity_limit)
        .with_notification_ttl(Duration::seconds(config.notification_ttl_secs));
    let app = build_router(state);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, admin = %config.admin_email, "folio admin started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("folio_admin=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
