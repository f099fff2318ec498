use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over `default_level`. Logs go to stderr so report output stays clean.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
