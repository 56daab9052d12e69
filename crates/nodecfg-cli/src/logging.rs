//! Tracing subscriber setup

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_FILTER: &str = "info";

/// Resolve the log filter
///
/// An explicit directive wins over `RUST_LOG`.
///
/// # Errors
/// Returns error if the explicit directive does not parse
pub fn filter(directive: Option<&str>) -> Result<EnvFilter> {
    match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level '{directive}'")),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Install the global subscriber, writing to stderr
///
/// # Errors
/// Returns error if the directive does not parse
pub fn init(directive: Option<&str>) -> Result<()> {
    let filter = filter(directive)?;
    // a subscriber may already be installed by an embedding test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directive_is_used() {
        let filter = filter(Some("nodecfg_migrate=debug")).unwrap();
        assert_eq!(filter.to_string(), "nodecfg_migrate=debug");
    }

    #[test]
    fn bad_directive_is_rejected() {
        assert!(filter(Some("nodecfg_migrate=loud")).is_err());
    }
}
