// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use quiz_backend::config::{Config, StorageBackend};
use quiz_backend::error::AppError;
use quiz_backend::routes;
use quiz_backend::services::refresh;
use quiz_backend::state::AppState;
use quiz_backend::store::{MemoryStore, PgStore, QuizStore};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if let Err(e) = run(config).await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    // The one place the store handle is built.
    let store: Arc<dyn QuizStore> = match &config.storage {
        StorageBackend::Postgres { database_url } => {
            Arc::new(PgStore::connect(database_url).await?)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store, data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    tracing::info!("Store ready...");

    // Start every run with an empty leaderboard and a fresh question set.
    if config.refresh_on_startup {
        if let Err(e) = refresh::refresh(store.as_ref()).await {
            tracing::error!("Startup refresh failed, serving existing data: {}", e);
        }
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(store, config);

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Quiz Competition server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Configuration(format!("cannot bind {}: {}", addr, e)))?;

    // Start the server
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))
}
