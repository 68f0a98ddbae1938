//! Tracing initialization and subscriber setup.

use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Sets up a registry with:
/// 1. An `EnvFilter` built from `RUST_LOG` when set, otherwise from
///    `config.trace_level`, otherwise `"info"`
/// 2. A formatting layer writing to stderr, so stdout stays free for the
///    runner's output
///
/// # Initialization Behavior
///
/// Idempotent: only the first call installs a subscriber; later calls (and
/// calls after another subscriber was installed) are ignored.
///
/// # Example
///
/// ```
/// use formbits::observability::init_tracing;
/// use formbits::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    let _ = subscriber.try_init();
}
