use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize tracing with a compact stdout layer.
///
/// Default level: `info`, with debug output for the mealpick crates.
/// Override via `RUST_LOG`.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,mealpick=debug,mealpick_openai=debug,tower_http=info")
    });

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .init();

    tracing::debug!("Tracing initialized");
}
