use std::net::SocketAddr;

use clap::Parser;

use super::SystemError;

/// User directory service - stores user records and their email preferences
#[derive(Debug, Clone, Parser)]
#[command(name = "user_directory", version)]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Mailbox capacity of the user store actor
    #[arg(long, default_value_t = 32)]
    pub channel_capacity: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<(), SystemError> {
        if self.channel_capacity == 0 {
            return Err(SystemError::Config(
                "channel capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
