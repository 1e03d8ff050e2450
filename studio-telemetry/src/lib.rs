//! Logging setup.
//!
//! Library crates only emit `tracing` events; binaries call [`init`] once to
//! print them.

#![warn(missing_docs, clippy::pedantic)]

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The fallback filter directive could not be parsed.
    #[error("invalid log filter `{filter}`: {source}")]
    InvalidFilter {
        /// Rejected directive.
        filter: String,
        /// Parser error.
        #[source]
        source: ParseError,
    },
}

/// Result alias for telemetry setup.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Builds the filter: `RUST_LOG` when set and valid, else `fallback`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `fallback` is used and is
/// not a valid directive.
pub fn env_filter(fallback: &str) -> TelemetryResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(fallback).map_err(|source| TelemetryError::InvalidFilter {
        filter: fallback.to_owned(),
        source,
    })
}

/// Installs a formatted subscriber as the global default.
///
/// Returns `Ok(false)` when a global subscriber was already installed.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for an unparsable `fallback`.
pub fn init(fallback: &str) -> TelemetryResult<bool> {
    let filter = env_filter(fallback)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok();
    if installed {
        debug!("tracing subscriber installed");
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_false() {
        init("info").unwrap();
        assert!(!init("debug").unwrap());
    }

    #[test]
    fn invalid_fallback_is_rejected() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let err = env_filter("studio=notalevel").unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidFilter { .. }));
    }
}
