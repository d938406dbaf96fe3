use tracing_subscriber::{EnvFilter, fmt};

/// Initialize diagnostics on stderr so rendered reports own stdout.
///
/// Filtering comes from `RUST_LOG`, defaulting to "warn".
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
