//! Tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so command output on stdout stays machine readable. `RUST_LOG` wins
//! over the verbosity flags when set.

use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Subsequent calls are ignored.
pub fn init_tracing(verbosity: u8, json: bool) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let registry = tracing_subscriber::registry().with(env_filter);
        if json {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true).with_current_span(true))
                .init();
        } else {
            registry.with(fmt::layer().with_writer(std::io::stderr).with_target(true)).init();
        }
    });
}
