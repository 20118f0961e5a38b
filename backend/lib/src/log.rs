//! Logging configuration and setup for the Vibent backend
//!
//! Provides the choice between JSON logging using Bunyan format or
//! human-readable text logging, with auto-detection based on whether
//! the output is a TTY (JSON if non-TTY, Text if TTY).

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;
use crate::constants::server::SERVICE_NAME;

/// Initialize logging with the specified format
///
/// Sets up the tracing subscriber with either JSON (Bunyan) or text
/// format logging based on the provided configuration. Filtering is
/// controlled through `RUST_LOG`.
pub fn initialize_logging(log_format: LogFormat) {
    let env_filter = EnvFilter::from_default_env();

    match log_format.resolve() {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(
                    SERVICE_NAME.to_string(),
                    std::io::stdout,
                ))
                .init();
        }
        LogFormat::Text | LogFormat::Auto => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
