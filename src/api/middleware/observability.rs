//! Observability setup.
//!
//! Installs the global tracing subscriber. `RUST_LOG` controls the filter
//! (default: info); `LOG_FORMAT=json` switches to structured JSON lines.

use crate::config::{AppConfig, LogFormat};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for the process.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(config: &AppConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match config.log_format {
        LogFormat::Json => builder.json().try_init()?,
        LogFormat::Text => builder.with_ansi(false).try_init()?,
    }

    info!(
        "Tracing initialized (env: {}, format: {:?})",
        config.app_env, config.log_format
    );
    Ok(())
}
