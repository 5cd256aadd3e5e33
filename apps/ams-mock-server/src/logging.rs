use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// Installs the global subscriber writing to stderr, stdout is kept for
/// command output. `RUST_LOG` wins over the configured level.
pub fn init(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let (json, plain) = if config.json {
        (
            Some(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            ),
            None,
        )
    } else {
        (None, Some(fmt::layer().with_writer(std::io::stderr)))
    };
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .try_init();
    if let Err(e) = result {
        eprintln!("logging already initialized: {e}");
    }
}
