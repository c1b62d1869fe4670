use thiserror::Error;

/// Failures while starting, serving, or stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}
