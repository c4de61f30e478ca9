use anyhow::bail;
use clap::Parser;
use core::time::Duration;
use vetpool::FaultPolicy;

/// Runtime configuration for the `vetpool` demo binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file in the working directory is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vetpool",
    version,
    about = "Drain integer and string sequences through a pool of validator workers"
)]
pub struct CliArgs {
    /// Number of worker threads spawned for each pass.
    ///
    /// Environment variable: `NUM_WORKERS`
    #[arg(long, env = "NUM_WORKERS", default_value_t = 3)]
    pub num_workers: usize,

    /// Upper bound of the integer pass. The stack receives `5 + i * 7` for
    /// every `i` in `0..=NUM_INTS`.
    ///
    /// Environment variable: `NUM_INTS`
    #[arg(long, env = "NUM_INTS", default_value_t = 20)]
    pub num_ints: u32,

    /// Pause between the integer pass and the string pass, in milliseconds.
    ///
    /// Environment variable: `PAUSE_MS`
    #[arg(long, env = "PAUSE_MS", default_value_t = 2000)]
    pub pause_ms: u64,

    /// Stop a pass at the first validator panic instead of counting it as a
    /// fault.
    ///
    /// Environment variable: `ABORT_ON_FAULT`
    #[arg(long, env = "ABORT_ON_FAULT", default_value_t = false)]
    pub abort_on_fault: bool,
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub num_workers: usize,
    pub num_ints: u32,
    pub pause: Duration,
    pub fault_policy: FaultPolicy,
}

impl TryFrom<CliArgs> for DemoConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.num_workers == 0 {
            bail!("NUM_WORKERS must be greater than 0");
        }

        let fault_policy = if args.abort_on_fault {
            FaultPolicy::Abort
        } else {
            FaultPolicy::Contain
        };

        Ok(Self {
            num_workers: args.num_workers,
            num_ints: args.num_ints,
            pause: Duration::from_millis(args.pause_ms),
            fault_policy,
        })
    }
}
