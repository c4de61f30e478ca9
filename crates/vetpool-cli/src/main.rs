#![doc = include_str!("../README.md")]

mod config;
mod demo;
mod telemetry;

use clap::Parser;
use config::{CliArgs, DemoConfig};
use telemetry::init_telemetry;

// Worker threads allocate their verdict messages and panic payloads
// concurrently; mimalloc keeps that cheap, especially on musl.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = DemoConfig::try_from(args)?;

    init_telemetry()?;

    if cfg!(debug_assertions) {
        tracing::info!("Starting demo with full config: {:#?}", config);
    } else {
        tracing::info!("Starting demo with {} workers", config.num_workers);
    }

    demo::run(&config).await?;

    tracing::info!("Demo finished");
    Ok(())
}
