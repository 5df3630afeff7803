pub mod bananas;
pub mod probe;

/// Installs a test-friendly `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call has an effect.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
