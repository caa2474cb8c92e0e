use std::backtrace::Backtrace;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Installs the global subscriber. `RUST_LOG` wins over the configured filter.
pub fn init_tracing(cfg: &LoggingConfig) {
    fmt().with_env_filter(env_filter(cfg)).with_target(false).init();
    set_panic_hook();
}

/// Like [`init_tracing`] but tolerates an already installed subscriber, for
/// test binaries that initialise logging from several tests.
pub fn try_init_test_tracing() {
    let cfg = LoggingConfig {
        rust_log: "warn".to_string(),
    };
    let _ = fmt()
        .with_env_filter(env_filter(&cfg))
        .with_test_writer()
        .try_init();
}

fn env_filter(cfg: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.rust_log))
}

fn set_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let message = if let Some(message) = info.payload().downcast_ref::<&str>() {
            *message
        } else if let Some(message) = info.payload().downcast_ref::<String>() {
            message.as_str()
        } else {
            "unknown panic"
        };

        let backtrace = Backtrace::capture();

        match info.location() {
            Some(location) => tracing::error!(
                panic = %message,
                location = %location,
                backtrace = %backtrace,
                "panic"
            ),
            None => tracing::error!(panic = %message, backtrace = %backtrace, "panic"),
        }
    }));
}
