//! Centralized logging configuration for unit-quaternion binaries
//!
//! The library itself only emits `tracing` events; executables call
//! [`init_logger`] once at startup to install a subscriber.

use tracing::Level;

/// Initialize the tracing subscriber with the standard configuration.
///
/// Default log level: INFO (overrideable via the `RUST_LOG` environment
/// variable).
///
/// # Example
/// ```no_run
/// use unit_quaternion::init_logger;
///
/// fn main() {
///     init_logger();
///     tracing::info!("starting up");
/// }
/// ```
pub fn init_logger() {
    init_logger_with_level(Level::INFO)
}

/// Initialize the tracing subscriber with a custom default level.
///
/// # Arguments
/// * `default_level` - The default log level (overrideable via `RUST_LOG`)
pub fn init_logger_with_level(default_level: Level) {
    use tracing_subscriber::fmt::time::SystemTime;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_timer(SystemTime)
        .with_target(true)
        .with_level(true)
        .init();
}
