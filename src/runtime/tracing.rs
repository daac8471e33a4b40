/// Initializes the tracing/logging infrastructure for the application.
///
/// This sets up structured logging using the `tracing` crate with:
/// - **Environment-based filtering**: Controlled via `RUST_LOG` environment variable
/// - **Compact formatting**: Spans inline, no module path (the `resource` and `endpoint`
///   fields already say where a line comes from)
///
/// # Environment Variables
///
/// Set `RUST_LOG` to control log verbosity:
/// - `RUST_LOG=info` - Store actions that succeeded, client initialization
/// - `RUST_LOG=warn` - Only failed store actions and API errors
/// - `RUST_LOG=debug` - Every request sent and every action started
/// - `RUST_LOG=rest_store::api=debug` - Debug only for the HTTP wrapper
///
/// Calling it more than once is harmless: later calls leave the first subscriber in place.
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
