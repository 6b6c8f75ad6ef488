//! Diagnostic logging
//!
//! Tables and reports go to stdout; diagnostics go to stderr through
//! `tracing` so they never mix with `--json` output.

use anyhow::Result;
use std::{env, io};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a `-v` count
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global subscriber. `RUST_LOG` wins over `verbosity`.
pub fn init(verbosity: u8) -> Result<()> {
    let env_filter = env::var("RUST_LOG").map_or_else(
        |_| EnvFilter::new(format!("liftlog={}", level_for(verbosity))),
        EnvFilter::new,
    );

    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()?;
    Ok(())
}
