use std::fs::File;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// configured level. A configured log file is truncated first.
///
/// Calling this twice keeps the first subscriber and leaves the configured
/// file untouched.
pub fn init_logging(config: &LoggingConfig) -> io::Result<()> {
    if tracing::dispatcher::has_been_set() {
        tracing::debug!("global subscriber already installed, keeping it");
        return Ok(());
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.file.is_empty() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        let file = File::create(&config.file)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .try_init()
    };
    if let Err(err) = result {
        tracing::debug!("subscriber not installed: {err}");
    }
    Ok(())
}
