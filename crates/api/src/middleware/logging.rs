//! Tracing subscriber setup.
//!
//! Format and level come from the `[logging]` config section; `RUST_LOG`
//! overrides the configured level when set. Request completion is logged
//! explicitly by the trace-id middleware, so no span-close events here.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::LoggingConfig;

/// Initializes the global tracing subscriber.
pub fn init_logging(config: &LoggingConfig) {
    // sqlx logs every statement at info; keep it quieter unless RUST_LOG
    // explicitly asks for it.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},sqlx=warn", config.level)));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(
                    fmt::layer()
                        .json()
                        .flatten_event(true)
                        .with_current_span(true)
                        .with_target(true),
                )
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().compact().with_target(true))
                .init();
        }
    }
}
