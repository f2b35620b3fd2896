use tracing_subscriber::EnvFilter;

use crate::AppConfig;

/// Installs the global fmt subscriber. `RUST_LOG` takes precedence over
/// `logging.level`. Calling it twice is harmless.
pub fn setup_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.logging.ansi)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level = %config.logging.level, "logging initialised");
    }
}
