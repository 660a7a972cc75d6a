//! Tracing setup for the `aecv` binary and embedding services.
//!
//! The filter comes from `AECV_LOG`, then `RUST_LOG`. Without either, AECV's
//! own crates log at the requested level and dependencies stay at `warn`.

use std::cmp;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "AECV_LOG";

/// Targets raised to the requested level by [`default_directive`].
const AECV_TARGETS: &[&str] = &["aecv_core", "aecv"];

/// Filter directive used when no environment override is present.
///
/// Dependencies never log more verbosely than `warn`; a quieter request
/// (`error`) applies everywhere.
pub fn default_directive(level: Level) -> String {
    let ours = level.as_str().to_ascii_lowercase();
    let global = cmp::min(level, Level::WARN).as_str().to_ascii_lowercase();
    let mut directive = global;
    for target in AECV_TARGETS {
        directive.push_str(&format!(",{target}={ours}"));
    }
    directive
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(default_directive(level)))
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Install the global subscriber, writing to stderr so stdout stays free
/// for rendered reports.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_tracing(json: bool, level: Level) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(level));
    let installed = if json {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).json())
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
    };
    installed.is_ok()
}
