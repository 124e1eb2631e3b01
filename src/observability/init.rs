//! Tracing subscriber setup.
//!
//! Configures a `tracing-subscriber` pipeline that filters spans by the
//! configured level and writes formatted events to stderr.

use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber.
///
/// # Level Resolution
///
/// 1. `config.log_level` if set
/// 2. Default: `"info"`
///
/// The value is an `EnvFilter` directive, so per-target levels like
/// `"info,artfeed::api=debug"` work.
///
/// # Initialization Behavior
///
/// Idempotent: safe to call multiple times, only the first call takes
/// effect. Observability is optional; failure to install is silently
/// ignored.
pub fn init_tracing(config: &Config) {
    let level = config.log_level.clone().unwrap_or_else(|| "info".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let _ = subscriber.try_init();
}
