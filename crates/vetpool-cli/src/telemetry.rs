//! Console logging for the demo binary.
//!
//! Events from the `vetpool` library (built with its `tracing` feature) and
//! from this binary go through a single `tracing_subscriber` registry:
//!
//! - `EnvFilter` reads `RUST_LOG`, falling back to `info`. Use
//!   `RUST_LOG=vetpool=trace` to see every worker start, verdict and stop.
//! - The `fmt` layer prints thread ids (worker threads are named
//!   `vetpool-worker-<id>`), file and line, with an RFC 3339 local timestamp.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true),
        )
        .try_init()?;

    Ok(())
}
