use tracing_subscriber::EnvFilter;

/// Configures the global subscriber once for the whole process.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies.
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=user_directory::service=debug,info cargo run
/// ```
pub fn setup_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
