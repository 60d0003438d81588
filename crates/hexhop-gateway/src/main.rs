mod app;
mod cli;
mod error;
mod handlers;
mod model;
mod state;

use crate::app::App;
use crate::cli::{StorageBackendArg, CLI};
use crate::state::AppState;
use clap::Parser;
use hexhop_generator::Sha256Generator;
use hexhop_shortener::ShortenerService;
use hexhop_storage::{DualStore, PostgresBackend};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        storage_backend = %config.storage,
        "starting hexhop gateway"
    );

    let store = match config.storage {
        StorageBackendArg::InMemory => DualStore::volatile_only(),
        StorageBackendArg::Postgres => {
            let dsn = config
                .postgres_dsn
                .as_deref()
                .ok_or("postgres dsn is required when storage backend is postgres")?;
            let backend = PostgresBackend::connect(dsn).await?;
            backend.ensure_schema().await?;
            DualStore::with_durable(
                Arc::new(backend),
                Duration::from_secs(config.durable_timeout_secs),
            )
        }
    };

    let service = ShortenerService::new(store, Sha256Generator::new());
    let state = AppState::new(Arc::new(service), config.public_base_url);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state)).await?;

    Ok(())
}
