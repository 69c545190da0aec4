//! # Rollcall API Server
//!
//! Serves create/read/update/delete endpoints for users.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/rollcall cargo run -p rollcall-api
//! DATABASE_CREATE_IF_MISSING=true DATABASE_URL=postgresql://localhost/rollcall cargo run -p rollcall-api
//! STORAGE_BACKEND=memory cargo run -p rollcall-api
//! ```

use rollcall_api::{
    app::{build_router, AppState},
    config::{Config, StorageBackend},
};
use rollcall_shared::{
    db::{migrations, pool},
    repository::{InMemoryUserRepository, PgUserRepository, UserRepository},
    service::UsersService,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!(
        "Rollcall API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let (repo, db): (Arc<dyn UserRepository>, Option<PgPool>) = match config.storage {
        StorageBackend::Postgres => {
            if config.create_database {
                migrations::ensure_database_exists(&config.database.url).await?;
            }
            let db = pool::create_pool(config.database.clone()).await?;
            migrations::run_migrations(&db).await?;
            let repo: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(db.clone()));
            (repo, Some(db))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
            (repo, None)
        }
    };

    let address = config.bind_address();
    let app = build_router(AppState::new(UsersService::new(repo), config));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = db {
        pool::close_pool(db).await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Installs the global subscriber; `LOG_FORMAT=json` selects JSON lines
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rollcall_api=debug,rollcall_shared=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
