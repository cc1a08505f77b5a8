//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`. The filter comes from the
//! `TALLY_LOG` environment variable when set, otherwise from settings.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable that overrides the configured filter
pub const LOG_ENV: &str = "TALLY_LOG";

static TRACING_INIT: Once = Once::new();

/// Filter directive in effect: `TALLY_LOG` if set and non-empty, else `configured`
pub fn effective_filter(configured: &str) -> String {
    match std::env::var(LOG_ENV) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => configured.to_string(),
    }
}

/// Install the global subscriber; later calls are no-ops
///
/// An unparsable directive falls back to `tally=info`.
pub fn init_tracing(configured: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_new(effective_filter(configured))
            .unwrap_or_else(|_| EnvFilter::new("tally=info"));
        install_subscriber(filter);
    });
}

/// Install a stderr subscriber; returns false if one was already set
///
/// A subscriber set by an embedding program or a test harness wins and is
/// left in place.
fn install_subscriber(filter: EnvFilter) -> bool {
    match fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        Ok(()) => true,
        Err(err) => {
            debug!(%err, "tracing subscriber already installed, keeping it");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing("tally=debug");
        init_tracing("not a [valid filter");
        tracing::debug!("still logging");
    }

    #[test]
    fn test_existing_subscriber_is_kept() {
        install_subscriber(EnvFilter::new("tally=info"));
        assert!(!install_subscriber(EnvFilter::new("tally=trace")));
    }

    #[test]
    fn test_configured_filter_used_without_override() {
        if std::env::var(LOG_ENV).is_err() {
            assert_eq!(effective_filter("tally=warn"), "tally=warn");
        }
    }
}
