//! HTTP server command.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::{self, AppState};
use crate::config::Config;
use crate::db::{self, SqliteSongRepository};
use crate::library::SongService;
use crate::songinfo::SongInfoClient;

/// Wire up the store, integration, service and router, then serve until
/// SIGINT or SIGTERM.
pub async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    let pool = db::init_db(&config.database.url, config.database.max_connections)
        .await
        .context("initialize database")?;

    let repository = SqliteSongRepository::new(pool.clone());
    let song_info = SongInfoClient::new(&config.song_info).context("build song-info client")?;
    let service = SongService::new(Arc::new(repository), Arc::new(song_info));
    let app = api::create_router(AppState::new(service));

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    info!(%addr, "starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;

    pool.close().await;
    info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutting down server gracefully...");
}
