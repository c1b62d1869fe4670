mod domain;
mod clients;

mod api;
mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod envelope;
mod error;
mod merge;
mod password;
mod repository;
mod service;
mod user_actor;
mod validation;

use clap::Parser;
use tracing::{error, info};

use crate::app_system::{setup_tracing, Config, SystemError, UserSystem};

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    let config = Config::parse();
    config.validate()?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_level);

    info!(bind = %config.bind, "Starting user directory");

    let system = UserSystem::new(config.channel_capacity);
    let app = api::router(system.service.clone());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    // The router owns a service clone; it is dropped when serving ends so
    // the store actor can stop.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    system.shutdown().await?;

    info!("User directory stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
