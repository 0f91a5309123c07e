//! Logging setup for the `beacon` binary.
//!
//! Filter precedence: `RUST_LOG`, then `BEACON_LOG`, then `warn` (`debug`
//! with `--verbose`). Output goes to stderr so records on stdout stay
//! pipeable.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if `BEACON_LOG` is not a valid filter directive or a
/// subscriber is already installed.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let fallback = std::env::var("BEACON_LOG").unwrap_or_else(|_| default_level.to_string());

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&fallback))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(verbose),
        )
        .try_init()?;

    Ok(())
}
